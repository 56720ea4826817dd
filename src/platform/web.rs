//! Browser bindings
//!
//! Wraps a `Game<CanvasSurface>` in `Rc<RefCell<..>>` shared by the DOM
//! listeners and the animation-frame loop, and exposes a small API to the
//! menu/wallet scripts.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::assets::PaddleModifier;
use crate::game::{Game, GameEvent};
use crate::renderer::CanvasSurface;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("Demit Pong module loaded");
}

/// Game plus the JS callbacks listening to it
struct Shared {
    game: Game<CanvasSurface>,
    on_game_over: Option<js_sys::Function>,
    on_menu_restored: Option<js_sys::Function>,
}

/// JS handle to a running game
#[wasm_bindgen]
pub struct WebGame {
    shared: Rc<RefCell<Shared>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Bind to the canvas with the given element id and draw the idle board
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebGame, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into()?;

        let settings = Settings::load();
        let surface = CanvasSurface::new(canvas.clone(), &settings.font_family)?;
        let mut game = Game::new(settings);
        game.initialize(surface, container_width(&canvas));

        let shared = Rc::new(RefCell::new(Shared {
            game,
            on_game_over: None,
            on_menu_restored: None,
        }));

        setup_resize_handler(&window, &canvas, shared.clone())?;
        setup_pointer_handler(&canvas, shared.clone())?;
        request_animation_frame(shared.clone());

        log::info!("Game Canvas Initialized and Responsive.");
        Ok(WebGame { shared })
    }

    /// Hide-the-menu moment: reset scores and begin the countdown
    #[wasm_bindgen(js_name = startMatch)]
    pub fn start_match(&self) {
        self.shared.borrow_mut().game.start_match(now());
    }

    /// Equip a paddle modifier directly
    #[wasm_bindgen(js_name = setPaddleModifier)]
    pub fn set_paddle_modifier(&self, color: String, speed_bonus: f32, length_multiplier: f32) {
        let modifier = PaddleModifier::new(color, speed_bonus, length_multiplier);
        self.shared.borrow_mut().game.set_paddle_modifier(modifier);
    }

    /// Equip from the paddle fields reported by the asset layer
    #[wasm_bindgen(js_name = equipPaddle)]
    pub fn equip_paddle(&self, color_hex: &str, speed_bonus: &str, rarity: &str) {
        let modifier = PaddleModifier::from_equipped(color_hex, speed_bonus, rarity);
        self.shared.borrow_mut().game.set_paddle_modifier(modifier);
    }

    /// Back to the default white paddle (wallet disconnected, nothing equipped)
    #[wasm_bindgen(js_name = clearPaddleModifier)]
    pub fn clear_paddle_modifier(&self) {
        self.shared.borrow_mut().game.clear_paddle_modifier();
    }

    /// `callback(winner)` with `"player"` or `"computer"`
    #[wasm_bindgen(js_name = onGameOver)]
    pub fn on_game_over(&self, callback: js_sys::Function) {
        self.shared.borrow_mut().on_game_over = Some(callback);
    }

    /// `callback()` once the result banner is done and the menu should return
    #[wasm_bindgen(js_name = onMenuRestored)]
    pub fn on_menu_restored(&self, callback: js_sys::Function) {
        self.shared.borrow_mut().on_menu_restored = Some(callback);
    }

    #[wasm_bindgen(getter, js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.shared.borrow().game.is_game_over()
    }

    #[wasm_bindgen(getter, js_name = playerScore)]
    pub fn player_score(&self) -> u32 {
        self.shared.borrow().game.state().player.score
    }

    #[wasm_bindgen(getter, js_name = computerScore)]
    pub fn computer_score(&self) -> u32 {
        self.shared.borrow().game.state().computer.score
    }
}

/// Same clock as the animation-frame timestamps
fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn container_width(canvas: &HtmlCanvasElement) -> f32 {
    canvas
        .parent_element()
        .map(|parent| parent.client_width() as f32)
        .unwrap_or(0.0)
}

fn setup_resize_handler(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    shared: Rc<RefCell<Shared>>,
) -> Result<(), JsValue> {
    let canvas = canvas.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let width = container_width(&canvas);
        shared.borrow_mut().game.on_resize(width);
    });
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_pointer_handler(
    canvas: &HtmlCanvasElement,
    shared: Rc<RefCell<Shared>>,
) -> Result<(), JsValue> {
    let canvas_clone = canvas.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
        let rect = canvas_clone.get_bounding_client_rect();
        shared
            .borrow_mut()
            .game
            .on_pointer_move(event.client_y() as f32, rect.top() as f32);
    });
    canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn request_animation_frame(shared: Rc<RefCell<Shared>>) {
    let Some(window) = web_sys::window() else {
        log::warn!("No window, animation loop stopped");
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(shared, time);
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}

fn game_loop(shared: Rc<RefCell<Shared>>, time: f64) {
    // Callbacks run after the borrow is released so they may call back in
    let (events, on_game_over, on_menu_restored) = {
        let mut s = shared.borrow_mut();
        s.game.frame(time);
        (
            s.game.take_events(),
            s.on_game_over.clone(),
            s.on_menu_restored.clone(),
        )
    };

    for event in events {
        let result = match event {
            GameEvent::GameOver { winner } => on_game_over
                .as_ref()
                .map(|cb| cb.call1(&JsValue::NULL, &JsValue::from_str(winner.as_str()))),
            GameEvent::MenuRestored => on_menu_restored
                .as_ref()
                .map(|cb| cb.call0(&JsValue::NULL)),
            _ => None,
        };
        if let Some(Err(e)) = result {
            log::warn!("Game event callback threw: {:?}", e);
        }
    }

    request_animation_frame(shared);
}
