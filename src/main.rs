//! Circular Illusion entry point
//!
//! Handles platform-specific initialization. On the web this wires the page
//! controls to the animation controller; natively it replays a headless
//! session and logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement};

    use circular_illusion::explain::{ExplanationPanel, ToggleAction, fetch_explanation, parse_markup};
    use circular_illusion::i18n::{Language, TextKey, translate};
    use circular_illusion::platform::WebScheduler;
    use circular_illusion::reading::{self, LOADING_DELAY_MS, ReadingPanel};
    use circular_illusion::renderer::{RenderState, SceneStyle, VertexSurface, render_frame, surface_size};
    use circular_illusion::sim::{Frame, SceneGeometry, TickInput, background_frame};
    use circular_illusion::ui::{ButtonStates, ids};
    use circular_illusion::{AnimationConfig, AnimationController, Settings};

    /// Everything the page shares between callbacks
    struct App {
        controller: AnimationController<WebScheduler>,
        render_state: Option<RenderState>,
        surface: VertexSurface,
        geometry: SceneGeometry,
        style: SceneStyle,
        settings: Settings,
        explanation: ExplanationPanel,
        reading: ReadingPanel,
        slider: Option<HtmlInputElement>,
        /// Repainted after a resize, since paused frames draw nothing
        last_frame: Frame,
    }

    impl App {
        fn new(scheduler: WebScheduler, settings: Settings) -> Self {
            let config = AnimationConfig::default();
            Self {
                geometry: SceneGeometry::new(glam::Vec2::ZERO, config.scene_radius),
                style: SceneStyle::from_config(&config),
                controller: AnimationController::new(config, scheduler),
                render_state: None,
                surface: VertexSurface::new(),
                settings,
                explanation: ExplanationPanel::new(),
                reading: ReadingPanel::new(),
                slider: None,
                last_frame: background_frame(),
            }
        }

        fn language(&self) -> Language {
            self.settings.language
        }

        /// One requestAnimationFrame callback
        fn on_frame(&mut self) {
            let raw = match &self.slider {
                Some(slider) => slider.value_as_number() as f32,
                None => self.settings.speed,
            };
            let input = TickInput::with_speed(self.controller.config().speed_from_slider(raw));
            let outcome = self.controller.on_frame(&input);

            if let Some(key) = outcome.description {
                self.set_description(key);
            }
            if let Some(frame) = outcome.frame {
                self.draw(&frame);
            }
        }

        fn draw(&mut self, frame: &Frame) {
            self.last_frame = frame.clone();
            self.present(frame);
        }

        fn present(&mut self, frame: &Frame) {
            render_frame(&mut self.surface, frame, &self.geometry, &self.style);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.surface.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement, dpr: f64) {
            let Some((width, height)) = surface_size(canvas.client_width(), canvas.client_height(), dpr)
            else {
                return;
            };
            if canvas.width() == width && canvas.height() == height {
                return;
            }
            canvas.set_width(width);
            canvas.set_height(height);

            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
                log::debug!("Surface resized to {}x{}", width, height);
            }
            let frame = self.last_frame.clone();
            self.present(&frame);
        }

        fn set_description(&self, key: TextKey) {
            if let Some(el) = element(ids::DESCRIPTION) {
                el.set_text_content(Some(translate(self.language(), key)));
            }
        }

        fn start(&mut self) {
            if self.controller.start() {
                self.sync_buttons();
            }
        }

        fn stop(&mut self) {
            if self.controller.stop() {
                self.set_description(TextKey::AnimationPaused);
                self.sync_buttons();
            }
        }

        fn resume(&mut self) {
            if self.controller.resume() {
                self.sync_buttons();
            }
        }

        fn end(&mut self) {
            if let Some(frame) = self.controller.end() {
                self.draw(&frame);
                self.set_description(TextKey::ClickToStart);
                self.explanation.hide();
                self.reading.hide();
                self.sync_panels();
            }
        }

        fn set_language(&mut self, lang: Language) {
            self.settings.language = lang;
            self.settings.save();
            apply_language(lang);
            self.set_description(self.controller.state().description());
            self.sync_panels();
            log::info!("Language set to {}", lang.as_str());
        }

        fn set_speed(&mut self, raw: f32) {
            self.settings.set_speed(raw);
            self.settings.save();
        }

        fn sync_buttons(&self) {
            let states = ButtonStates::derive(
                self.controller.state().app_phase,
                self.explanation.is_loading(),
                self.reading.is_loading(),
            );
            for (id, enabled) in states.by_id() {
                if let Some(button) = element(id).and_then(|el| el.dyn_into::<HtmlButtonElement>().ok()) {
                    button.set_disabled(!enabled);
                }
            }
        }

        /// Bring both panels and the buttons in line with their state machines
        fn sync_panels(&self) {
            let lang = self.language();

            set_display(ids::EXPLANATION_CONTAINER, self.explanation.is_visible(), "block");
            set_display(ids::EXPLANATION_LOADER, self.explanation.shows_loader(), "block");
            if let Some(el) = element(ids::EXPLANATION_TEXT) {
                let text = self.explanation.displayed_text(lang).unwrap_or_default();
                if let Err(e) = render_markup(&el, text) {
                    log::warn!("Failed to render explanation: {:?}", e);
                }
            }
            set_display(ids::READING_TRIGGER, self.explanation.shows_reading_trigger(), "flex");

            set_display(ids::READING_CONTAINER, self.reading.is_visible(), "block");
            set_display(ids::READING_LOADER, self.reading.is_loading(), "block");
            if let Some(el) = element(ids::READING_CONTENT) {
                let shown = self.reading.is_visible() && !self.reading.is_loading();
                let result = if shown {
                    render_reading(&el, lang)
                } else {
                    el.set_text_content(None);
                    Ok(())
                };
                if let Err(e) = result {
                    log::warn!("Failed to render reading list: {:?}", e);
                }
            }

            self.sync_buttons();
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Look up an element, warning when the page lacks it
    fn element(id: &str) -> Option<Element> {
        let el = document()?.get_element_by_id(id);
        if el.is_none() {
            log::warn!("Missing element #{}", id);
        }
        el
    }

    fn set_display(id: &str, visible: bool, display: &str) {
        if let Some(el) = element(id).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
            let value = if visible { display } else { "none" };
            let _ = el.style().set_property("display", value);
        }
    }

    /// Relabel every `data-i18n` element and the document title
    fn apply_language(lang: Language) {
        let Some(document) = document() else { return };

        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("lang", lang.html_lang());
        }
        document.set_title(translate(lang, TextKey::Title));

        let Ok(nodes) = document.query_selector_all("[data-i18n]") else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(name) = el.get_attribute("data-i18n") else {
                continue;
            };
            match TextKey::from_attr(&name) {
                Some(key) => el.set_text_content(Some(translate(lang, key))),
                None => log::warn!("Unknown i18n key: {}", name),
            }
        }
    }

    /// Replace `target`'s children with the emphasis-marked `text`
    fn render_markup(target: &Element, text: &str) -> Result<(), JsValue> {
        let document = document().ok_or("no document")?;
        target.set_text_content(None);

        for span in parse_markup(text) {
            let tag = match (span.bold, span.italic) {
                (true, _) => "strong",
                (false, true) => "em",
                (false, false) => "span",
            };
            let node = document.create_element(tag)?;
            if span.bold && span.italic {
                let inner = document.create_element("em")?;
                inner.set_text_content(Some(&span.text));
                node.append_child(&inner)?;
            } else {
                node.set_text_content(Some(&span.text));
            }
            target.append_child(&node)?;
        }
        Ok(())
    }

    fn render_reading(target: &Element, lang: Language) -> Result<(), JsValue> {
        let document = document().ok_or("no document")?;
        target.set_text_content(None);

        for section in reading::sections() {
            let heading = document.create_element("h4")?;
            heading.set_text_content(Some(translate(lang, section.heading)));
            target.append_child(&heading)?;

            let list = document.create_element("ul")?;
            for entry in &section.entries {
                let item = document.create_element("li")?;
                let link = document.create_element("a")?;
                link.set_attribute("href", entry.link)?;
                link.set_attribute("target", "_blank")?;
                link.set_text_content(Some(entry.title));
                item.append_child(&link)?;
                if let Some(journal) = entry.journal {
                    let note = document.create_element("span")?;
                    note.set_text_content(Some(&format!(" ({})", journal)));
                    item.append_child(&note)?;
                }
                list.append_child(&item)?;
            }
            target.append_child(&list)?;
        }
        Ok(())
    }

    /// Attach a click handler to `#id`
    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let Some(el) = element(id) else { return };
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        if let Err(e) = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to bind #{}: {:?}", id, e);
        }
        closure.forget();
    }

    fn setup_lifecycle_buttons(app: &Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_click(ids::START, move |_| app.borrow_mut().start());
        }
        {
            let app = app.clone();
            on_click(ids::STOP, move |_| app.borrow_mut().stop());
        }
        {
            let app = app.clone();
            on_click(ids::CONTINUE, move |_| app.borrow_mut().resume());
        }
        {
            let app = app.clone();
            on_click(ids::END, move |_| app.borrow_mut().end());
        }
    }

    fn setup_language_buttons(app: &Rc<RefCell<App>>) {
        for (id, lang) in [(ids::LANG_PT, Language::PtBr), (ids::LANG_EN, Language::En)] {
            let app = app.clone();
            on_click(id, move |_| app.borrow_mut().set_language(lang));
        }
    }

    fn setup_speed_slider(app: &Rc<RefCell<App>>) {
        let Some(slider) = element(ids::SPEED_SLIDER).and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        slider.set_value(&app.borrow().settings.speed.to_string());
        app.borrow_mut().slider = Some(slider.clone());

        let app = app.clone();
        let input = slider.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().set_speed(input.value_as_number() as f32);
        });
        if let Err(e) = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to bind speed slider: {:?}", e);
        }
        closure.forget();
    }

    fn setup_explain_button(app: &Rc<RefCell<App>>) {
        let app = app.clone();
        on_click(ids::EXPLAIN, move |_| {
            let action = {
                let mut a = app.borrow_mut();
                let lang = a.language();
                a.explanation.toggle(lang)
            };

            match action {
                ToggleAction::Ignored => {}
                ToggleAction::Hide => {
                    let mut a = app.borrow_mut();
                    a.reading.hide();
                    a.sync_panels();
                }
                ToggleAction::Request { request_id, request } => {
                    app.borrow().sync_panels();
                    log::info!("Requesting explanation #{}", request_id);

                    let app = app.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let result = fetch_explanation(&request).await;
                        let mut a = app.borrow_mut();
                        // Even a discarded answer releases the explain button
                        a.explanation.complete(request_id, result);
                        a.sync_panels();
                    });
                }
            }
        });
    }

    fn setup_reading_button(app: &Rc<RefCell<App>>) {
        let app = app.clone();
        on_click(ids::FURTHER_READING, move |_| {
            let generation = app.borrow_mut().reading.toggle();
            app.borrow().sync_panels();

            let Some(generation) = generation else { return };
            let Some(window) = web_sys::window() else { return };

            let app = app.clone();
            let closure = Closure::once(move || {
                let mut a = app.borrow_mut();
                if a.reading.finish_loading(generation) {
                    a.sync_panels();
                }
            });
            if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                LOADING_DELAY_MS,
            ) {
                log::warn!("Failed to schedule reading list: {:?}", e);
            }
            closure.forget();
        });
    }

    fn setup_resize_handler(app: &Rc<RefCell<App>>, canvas: HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            app.borrow_mut().resize(&canvas, dpr);
        });
        if let Err(e) = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to bind resize: {:?}", e);
        }
        closure.forget();
    }

    async fn init_renderer(canvas: HtmlCanvasElement, scene_radius: f32) -> Result<RenderState, JsValue> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, scene_radius)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get device: {}", e)))
    }

    pub async fn run() -> Result<(), JsValue> {
        log::info!("Circular Illusion starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(ids::CANVAS)
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = surface_size(canvas.client_width(), canvas.client_height(), window.device_pixel_ratio())
            .ok_or("canvas has no area")?;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let weak = weak.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().on_frame();
                }
            });
            RefCell::new(App::new(WebScheduler::new(callback), settings))
        });

        apply_language(app.borrow().language());
        setup_lifecycle_buttons(&app);
        setup_language_buttons(&app);
        setup_speed_slider(&app);
        setup_explain_button(&app);
        setup_reading_button(&app);
        {
            let a = app.borrow();
            a.set_description(TextKey::ClickToStart);
            a.sync_panels();
        }

        let scene_radius = app.borrow().controller.config().scene_radius;
        let render_state = init_renderer(canvas.clone(), scene_radius).await?;
        app.borrow_mut().render_state = Some(render_state);
        setup_resize_handler(&app, canvas);
        {
            let mut a = app.borrow_mut();
            // The session may already be running; its next frame repaints anyway
            if a.controller.state().is_idle() {
                a.draw(&background_frame());
            }
        }

        log::info!("Circular Illusion ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = web_app::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circular Illusion (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    replay_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one full session with a manual scheduler until every axis is visible
#[cfg(not(target_arch = "wasm32"))]
fn replay_session() {
    use circular_illusion::platform::ManualScheduler;
    use circular_illusion::renderer::{SceneStyle, VertexSurface, render_frame};
    use circular_illusion::sim::{SceneGeometry, TickInput};
    use circular_illusion::{AnimationConfig, AnimationController, Settings};

    const MAX_FRAMES: u32 = 20_000;

    let settings = Settings::load();
    let config = AnimationConfig::default();
    let input = TickInput::with_speed(config.speed_from_slider(settings.speed));
    let geometry = SceneGeometry::new(glam::Vec2::ZERO, config.scene_radius);
    let style = SceneStyle::from_config(&config);
    let mut surface = VertexSurface::new();
    let mut controller = AnimationController::new(config, ManualScheduler::new());

    controller.start();
    let mut frames = 0;
    while frames < MAX_FRAMES && controller.frames_mut().scheduler_mut().deliver() {
        frames += 1;
        let outcome = controller.on_frame(&input);
        if let Some(frame) = &outcome.frame {
            render_frame(&mut surface, frame, &geometry, &style);
        }
        if outcome.phase_changed {
            log::info!("Frame {}: phase 2 begins", frames);
        }
        if outcome.line_revealed {
            log::info!(
                "Frame {}: {} axes visible ({} vertices)",
                frames,
                controller.state().visible_line_count,
                surface.vertices().len()
            );
        }
        if controller.state().visible_line_count == controller.config().point_count {
            break;
        }
    }

    if let Some(frame) = controller.end() {
        render_frame(&mut surface, &frame, &geometry, &style);
    }
    log::info!(
        "Session ended after {} frames at speed {:.3} rad/frame",
        frames,
        input.speed
    );
}
