#![allow(clippy::future_not_send)]

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{JsCast, prelude::*};
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, KeyboardEvent, console, window};

use gridfall_core::net::{Action, StateResponse};

use crate::{
    draw::DrawingContext,
    input::action_for_key,
    net::{Api, FetchError},
};

/// Gravity cadence of the original client.
const TICK_INTERVAL_MS: i32 = 500;

const BOARD_X: f64 = 160.;
const BOARD_Y: f64 = 60.;

#[wasm_bindgen]
pub struct Instance {
    renderer: Rc<Renderer>,
    api: Rc<Api>,
    state: Rc<RefCell<Option<StateResponse>>>,
    interval_handle: Option<i32>,
    keydown_listener: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    tick_callback: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl Instance {
    #[wasm_bindgen(constructor)]
    pub fn new(context: CanvasRenderingContext2d, backend_url: String) -> Self {
        Self {
            renderer: Rc::new(Renderer {
                context,
                drawing_context: DrawingContext::new(),
            }),
            api: Rc::new(Api::new(backend_url)),
            state: Rc::new(RefCell::new(None)),
            interval_handle: None,
            keydown_listener: None,
            tick_callback: None,
        }
    }

    /// Repaints from the last polled state. Before the first poll only the
    /// empty board frame is shown.
    #[wasm_bindgen]
    pub fn draw(&self) {
        self.renderer.draw(self.state.borrow().as_ref());
    }

    /// Fetches the current server state and repaints.
    #[wasm_bindgen]
    pub async fn refresh(&self) -> Result<(), JsValue> {
        refresh(&self.api, &self.state, &self.renderer)
            .await
            .map_err(Into::into)
    }

    /// Forwards a `KeyboardEvent.key` value. Keys without a mapped action are
    /// a no-op.
    #[wasm_bindgen]
    pub async fn key_down(&self, key: &str) -> Result<(), JsValue> {
        let Some(action) = action_for_key(key) else {
            return Ok(());
        };
        send_and_refresh(&self.api, &self.state, &self.renderer, action)
            .await
            .map_err(Into::into)
    }

    /// One gravity step: sends `tick`, then repaints from the fresh state.
    #[wasm_bindgen]
    pub async fn tick(&self) -> Result<(), JsValue> {
        send_and_refresh(&self.api, &self.state, &self.renderer, Action::Tick)
            .await
            .map_err(Into::into)
    }

    /// Wires the client to the page: a `keydown` listener on `window`, the
    /// gravity interval, and one initial refresh. Round-trips triggered from
    /// here run detached; failures land on the console and the next trigger
    /// simply tries again.
    #[wasm_bindgen]
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.interval_handle.is_some() {
            return Ok(());
        }
        let window = window().ok_or_else(|| JsValue::from_str("no global `window`"))?;

        let keydown = {
            let api = Rc::clone(&self.api);
            let state = Rc::clone(&self.state);
            let renderer = Rc::clone(&self.renderer);
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let Some(action) = action_for_key(&event.key()) else {
                    return;
                };
                let api = Rc::clone(&api);
                let state = Rc::clone(&state);
                let renderer = Rc::clone(&renderer);
                spawn_local(async move {
                    report(send_and_refresh(&api, &state, &renderer, action).await);
                });
            })
        };
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        let tick = {
            let api = Rc::clone(&self.api);
            let state = Rc::clone(&self.state);
            let renderer = Rc::clone(&self.renderer);
            Closure::<dyn FnMut()>::new(move || {
                let api = Rc::clone(&api);
                let state = Rc::clone(&state);
                let renderer = Rc::clone(&renderer);
                spawn_local(async move {
                    report(send_and_refresh(&api, &state, &renderer, Action::Tick).await);
                });
            })
        };
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS,
        )?;

        self.keydown_listener = Some(keydown);
        self.tick_callback = Some(tick);
        self.interval_handle = Some(handle);

        let api = Rc::clone(&self.api);
        let state = Rc::clone(&self.state);
        let renderer = Rc::clone(&self.renderer);
        spawn_local(async move {
            report(refresh(&api, &state, &renderer).await);
        });
        Ok(())
    }

    /// Detaches everything wired up by `start`.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        let Some(window) = window() else {
            return;
        };
        if let Some(handle) = self.interval_handle.take() {
            window.clear_interval_with_handle(handle);
        }
        if let Some(listener) = self.keydown_listener.take() {
            let _ = window
                .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
        }
        self.tick_callback = None;
    }
}

struct Renderer {
    context: CanvasRenderingContext2d,
    drawing_context: DrawingContext,
}

impl Renderer {
    /// Full rebuild on every poll, like the page it replaces.
    fn draw(&self, state: Option<&StateResponse>) {
        DrawingContext::clear(&self.context);
        self.drawing_context
            .draw_board(&self.context, BOARD_X, BOARD_Y);
        let Some(state) = state else {
            return;
        };
        self.drawing_context
            .draw_field(&self.context, &state.board, BOARD_X + 5., BOARD_Y + 5.);
        DrawingContext::draw_score(&self.context, state.score, BOARD_X, 20.);
    }
}

async fn refresh(
    api: &Api,
    state: &RefCell<Option<StateResponse>>,
    renderer: &Renderer,
) -> Result<(), FetchError> {
    let fresh = api.fetch_state().await?;
    *state.borrow_mut() = Some(fresh);
    renderer.draw(state.borrow().as_ref());
    Ok(())
}

async fn send_and_refresh(
    api: &Api,
    state: &RefCell<Option<StateResponse>>,
    renderer: &Renderer,
    action: Action,
) -> Result<(), FetchError> {
    api.send_action(action).await?;
    refresh(api, state, renderer).await
}

fn report(result: Result<(), FetchError>) {
    if let Err(err) = result {
        console::error_1(&JsValue::from_str(&err.to_string()));
    }
}
