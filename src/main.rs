//! Midnight Reveal entry point
//!
//! On web this wires the deterministic core to the page. Natively it runs a
//! headless dry run of the same core.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        DeviceOrientationEvent, Document, Element, Event, EventTarget, HtmlCanvasElement,
        HtmlElement, HtmlMediaElement, ScrollBehavior, ScrollIntoViewOptions,
        ScrollLogicalPosition, Window,
    };

    use midnight_reveal::Settings;
    use midnight_reveal::audio::{MusicPlayer, Playback, VolumeRamp, resume_if_paused, toggle_playback};
    use midnight_reveal::consts::*;
    use midnight_reveal::content::{ModalKind, Overlay};
    use midnight_reveal::renderer::CanvasSurface;
    use midnight_reveal::sim::{
        Countdown, CountdownUpdate, Deadline, Fireworks, FireworksConfig, FrameOutcome, LongPress,
        TooltipEvent, TooltipPhase, UnlockController, UnlockEffects, parallax_transform,
    };

    /// Page elements, looked up once at startup
    struct Elements {
        body: HtmlElement,
        lock_screen: HtmlElement,
        main_content: HtmlElement,
        unlock_btn: Element,
        countdown: Element,
        lock_text: Element,
        lock_hint: Element,
        modal: Element,
        modal_body: Element,
        music_toggle: Option<Element>,
        sparkles: Option<HtmlElement>,
        title: Option<Element>,
    }

    impl Elements {
        fn find(document: &Document) -> Result<Self, JsValue> {
            Ok(Self {
                body: document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no <body>"))?,
                lock_screen: by_id(document, "lock-screen")?,
                main_content: by_id(document, "main-content")?,
                unlock_btn: by_id(document, "unlock-btn")?,
                countdown: by_id(document, "countdown")?,
                lock_text: by_id(document, "lock-text")?,
                lock_hint: by_id(document, "lock-hint")?,
                modal: by_id(document, "modal")?,
                modal_body: by_id(document, "modal-body")?,
                music_toggle: document.query_selector(".music-toggle").ok().flatten(),
                sparkles: document
                    .get_element_by_id("sparkles")
                    .and_then(|el| el.dyn_into().ok()),
                title: document.query_selector(".title").ok().flatten(),
            })
        }
    }

    /// Required element by id
    fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
    }

    fn window() -> Window {
        web_sys::window().expect("no window")
    }

    fn performance_now() -> f64 {
        window()
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Browser timer delay, saturating at the largest signed 32-bit value
    fn timer_ms(ms: u32) -> i32 {
        i32::try_from(ms).unwrap_or(i32::MAX)
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        let _ = el.style().set_property(property, value);
    }

    /// Attach a listener that lives for the rest of the session
    fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for {event}: {:?}", e);
        }
        closure.forget();
    }

    /// Page instance holding all state
    struct Page {
        settings: Settings,
        elements: Elements,
        countdown: Countdown,
        countdown_interval: Option<i32>,
        unlock: UnlockController,
        fireworks: Fireworks,
        surface: CanvasSurface,
        music: MusicPlayer,
        fade: Option<VolumeRamp>,
        fade_interval: Option<i32>,
        overlay: Overlay,
        long_press: LongPress,
        press_timer: Option<i32>,
        tooltip: Option<HtmlElement>,
    }

    type Shared = Rc<RefCell<Page>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Midnight Reveal starting...");

        let window = window();
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let elements = Elements::find(&document)?;
        hard_reset(&window, &elements);

        let canvas: HtmlCanvasElement = by_id(&document, "fireworks-canvas")?;
        let surface = CanvasSurface::new(canvas)?;
        let (w, h) = inner_size(&window);
        let (width, height) = surface.resize(w, h);

        let music: HtmlMediaElement = by_id(&document, "bg-music")?;

        let deadline = Deadline::next_new_year(&chrono::Local::now());
        match deadline {
            Some(d) => log::info!("Counting down to {} (epoch ms {})", d.year, d.epoch_ms),
            None => log::warn!("Local New Year midnight does not exist - unlocking now"),
        }

        let seed = js_sys::Date::now() as u64;
        let page = Rc::new(RefCell::new(Page {
            countdown: Countdown::new(deadline),
            countdown_interval: None,
            unlock: UnlockController::new(&settings),
            fireworks: Fireworks::new(width, height, seed, FireworksConfig::from(&settings)),
            surface,
            music: MusicPlayer::new(music),
            fade: None,
            fade_interval: None,
            overlay: Overlay::default(),
            long_press: LongPress::new(&settings),
            press_timer: None,
            tooltip: None,
            elements,
            settings,
        }));

        setup_resize(page.clone());
        setup_unlock_button(page.clone());
        setup_music_toggle(page.clone());
        setup_modals(&document, page.clone());
        setup_long_press(page.clone());
        start_countdown(page)?;

        log::info!("Midnight Reveal running!");
        Ok(())
    }

    /// Lock screen up, everything else hidden, top of page
    fn hard_reset(window: &Window, el: &Elements) {
        set_style(&el.main_content, "display", "none");
        let _ = el.main_content.class_list().add_1("hidden");

        set_style(&el.lock_screen, "display", "flex");
        let _ = el.lock_screen.class_list().remove_1("hidden");

        let _ = el.unlock_btn.class_list().add_1("hidden");
        if let Some(toggle) = &el.music_toggle {
            let _ = toggle.class_list().add_1("hidden");
        }

        window.scroll_to_with_x_and_y(0.0, 0.0);
    }

    fn inner_size(window: &Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    fn setup_resize(page: Shared) {
        on(&window(), "resize", move |_event| {
            let (w, h) = inner_size(&window());
            let mut g = page.borrow_mut();
            let (w, h) = g.surface.resize(w, h);
            g.fireworks.resize(w, h);
        });
    }

    // === Countdown ===

    fn start_countdown(page: Shared) -> Result<(), JsValue> {
        let tick_ms = timer_ms(page.borrow().settings.tick_ms);
        let handle = page.clone();
        let closure = Closure::<dyn FnMut()>::new(move || countdown_tick(&handle));
        let id = window().set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            tick_ms,
        )?;
        closure.forget();
        page.borrow_mut().countdown_interval = Some(id);

        // Render immediately rather than after the first period
        countdown_tick(&page);
        Ok(())
    }

    fn countdown_tick(page: &Shared) {
        let mut g = page.borrow_mut();
        let now = js_sys::Date::now() as i64;
        match g.countdown.tick(now) {
            Some(CountdownUpdate::Remaining(text)) => {
                g.elements.countdown.set_text_content(Some(&text));
            }
            Some(CountdownUpdate::Expired) => {
                if let Some(id) = g.countdown_interval.take() {
                    window().clear_interval_with_handle(id);
                }
                let el = &g.elements;
                el.countdown.set_text_content(Some(EXPIRED_DISPLAY));
                el.lock_text.set_text_content(Some(EXPIRED_LOCK_TEXT));
                el.lock_hint.set_text_content(Some(EXPIRED_LOCK_HINT));
                let _ = el.unlock_btn.class_list().remove_1("hidden");
            }
            None => {}
        }
    }

    // === Unlock ===

    fn setup_unlock_button(page: Shared) {
        let btn = page.borrow().elements.unlock_btn.clone();
        on(&btn, "click", move |_event| unlock(&page));
    }

    fn unlock(page: &Shared) {
        let mut guard = page.borrow_mut();
        let g = &mut *guard;
        let mut effects = PageEffects {
            page,
            elements: &g.elements,
            fireworks: &mut g.fireworks,
            music: &mut g.music,
            fade: &mut g.fade,
            fade_interval: &mut g.fade_interval,
            parallax_divisor: g.settings.parallax_divisor,
        };
        g.unlock.unlock(&mut effects);
    }

    /// DOM side of the unlock transition
    struct PageEffects<'a> {
        page: &'a Shared,
        elements: &'a Elements,
        fireworks: &'a mut Fireworks,
        music: &'a mut MusicPlayer,
        fade: &'a mut Option<VolumeRamp>,
        fade_interval: &'a mut Option<i32>,
        parallax_divisor: f64,
    }

    impl UnlockEffects for PageEffects<'_> {
        fn hide_lock_screen(&mut self) {
            set_style(&self.elements.lock_screen, "display", "none");
            let _ = self.elements.lock_screen.class_list().add_1("hidden");
        }

        fn reveal_content(&mut self) {
            let content = &self.elements.main_content;
            set_style(content, "display", "flex");
            let _ = content.class_list().remove_1("hidden");
            // Triggers the CSS fade-in
            let _ = content.class_list().add_1("unlocked");
            let _ = self.elements.body.class_list().remove_1("locked");
        }

        fn schedule_scroll_into_view(&mut self, delay_ms: u32) {
            let content = self.elements.main_content.clone();
            let closure = Closure::once(move || {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                content.scroll_into_view_with_scroll_into_view_options(&options);
            });
            let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timer_ms(delay_ms),
            );
            closure.forget();
        }

        fn flourish_sparkles(&mut self) {
            if let Some(sparkles) = &self.elements.sparkles {
                set_style(sparkles, "opacity", "1");
                set_style(sparkles, "animation", "sparkle 2s ease-out");
            }
        }

        fn start_fireworks(&mut self) {
            self.fireworks.activate();
            request_animation_frame(self.page.clone());
        }

        fn start_music_fade(&mut self, mut ramp: VolumeRamp) {
            ramp.start(&mut *self.music);
            let interval = timer_ms(ramp.interval_ms());
            *self.fade = Some(ramp);

            let handle = self.page.clone();
            let closure = Closure::<dyn FnMut()>::new(move || fade_tick(&handle));
            match window().set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval,
            ) {
                Ok(id) => *self.fade_interval = Some(id),
                Err(e) => log::warn!("Could not start music fade: {:?}", e),
            }
            closure.forget();
        }

        fn reveal_music_toggle(&mut self) {
            if let Some(toggle) = &self.elements.music_toggle {
                let _ = toggle.class_list().remove_1("hidden");
            }
        }

        fn install_parallax(&mut self) {
            let body = self.elements.body.clone();
            let divisor = self.parallax_divisor;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                let transform = parallax_transform(event.gamma(), event.beta(), divisor);
                set_style(&body, "transform", &transform);
            });
            let _ = window().add_event_listener_with_callback_and_bool(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
                true,
            );
            closure.forget();
        }
    }

    fn fade_tick(page: &Shared) {
        let mut guard = page.borrow_mut();
        let g = &mut *guard;
        let Some(ramp) = g.fade.as_mut() else { return };
        if !ramp.advance(&mut g.music) {
            if let Some(id) = g.fade_interval.take() {
                window().clear_interval_with_handle(id);
            }
            g.fade = None;
            log::info!("Music fade-in complete");
        }
    }

    // === Fireworks loop ===

    fn request_animation_frame(page: Shared) {
        let closure = Closure::once(move |_time: f64| {
            animation_frame(page);
        });
        let _ = window().request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_frame(page: Shared) {
        let outcome = {
            let mut guard = page.borrow_mut();
            let g = &mut *guard;
            g.fireworks.frame(&mut g.surface)
        };
        if outcome != FrameOutcome::Stopped {
            request_animation_frame(page);
        }
    }

    // === Music toggle ===

    fn setup_music_toggle(page: Shared) {
        let Some(toggle) = page.borrow().elements.music_toggle.clone() else {
            return;
        };
        let target = toggle.clone();
        on(&target, "click", move |_event| {
            let playing = toggle_playback(&mut page.borrow_mut().music);
            let classes = toggle.class_list();
            let _ = if playing {
                classes.add_1("playing")
            } else {
                classes.remove_1("playing")
            };
        });
    }

    // === Modals ===

    fn setup_modals(document: &Document, page: Shared) {
        if let Ok(triggers) = document.query_selector_all("[data-message]") {
            for i in 0..triggers.length() {
                let Some(el) = triggers.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let tag = el.get_attribute("data-message").unwrap_or_default();
                let Some(kind) = ModalKind::from_str(&tag) else {
                    log::warn!("Unknown message type: {tag:?}");
                    continue;
                };
                let page = page.clone();
                on(&el, "click", move |_event| show_message(&page, kind));
            }
        }

        if let Ok(closers) = document.query_selector_all("[data-modal-close]") {
            for i in 0..closers.length() {
                let Some(node) = closers.get(i) else { continue };
                let page = page.clone();
                on(&node, "click", move |_event| close_modal(&page));
            }
        }
    }

    fn show_message(page: &Shared, kind: ModalKind) {
        let mut g = page.borrow_mut();
        let html = g.overlay.open(kind);
        g.elements.modal_body.set_inner_html(html);

        if kind.has_video() {
            wire_video(&g.elements.modal_body, page.clone());
        }

        let _ = g.elements.modal.class_list().remove_1("hidden");
    }

    /// Full-volume video; playing it brings background music back
    fn wire_video(body: &Element, page: Shared) {
        let Some(video) = body
            .query_selector("video")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
        else {
            log::warn!("Video modal has no <video>");
            return;
        };
        video.set_volume(1.0);
        on(&video, "play", move |_event| {
            resume_if_paused(&mut page.borrow_mut().music);
        });
    }

    fn close_modal(page: &Shared) {
        let mut g = page.borrow_mut();
        g.overlay.close();
        let _ = g.elements.modal.class_list().add_1("hidden");
        g.elements.modal_body.set_inner_html("");
        g.music.play();
    }

    // === Long press ===

    fn setup_long_press(page: Shared) {
        let Some(title) = page.borrow().elements.title.clone() else {
            return;
        };

        for event in ["mousedown", "touchstart"] {
            let page = page.clone();
            on(&title, event, move |_event| {
                page.borrow_mut().long_press.press(performance_now());
                schedule_tooltip_wakeup(&page);
            });
        }

        for event in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
            let page = page.clone();
            on(&title, event, move |_event| {
                let mut g = page.borrow_mut();
                if let TooltipPhase::Pressing { .. } = g.long_press.phase() {
                    g.long_press.release();
                    if let Some(id) = g.press_timer.take() {
                        window().clear_timeout_with_handle(id);
                    }
                }
            });
        }
    }

    fn schedule_tooltip_wakeup(page: &Shared) {
        let mut g = page.borrow_mut();
        if let Some(id) = g.press_timer.take() {
            window().clear_timeout_with_handle(id);
        }
        let Some(due) = g.long_press.next_wakeup() else {
            return;
        };
        let delay = (due - performance_now()).max(0.0).ceil() as i32;

        let handle = page.clone();
        let closure = Closure::once(move || tooltip_wakeup(&handle));
        match window().set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => g.press_timer = Some(id),
            Err(e) => log::warn!("Could not schedule tooltip: {:?}", e),
        }
        closure.forget();
    }

    fn tooltip_wakeup(page: &Shared) {
        {
            let mut g = page.borrow_mut();
            g.press_timer = None;
            match g.long_press.poll(performance_now()) {
                Some(TooltipEvent::Show) => {
                    let tooltip = create_tooltip(&g.elements);
                    g.tooltip = tooltip;
                }
                Some(TooltipEvent::BeginFade) => {
                    if let Some(tooltip) = &g.tooltip {
                        set_style(tooltip, "opacity", "0");
                        set_style(tooltip, "transform", "translate(-50%, -10px) scale(0.8)");
                    }
                }
                Some(TooltipEvent::Remove) => {
                    if let Some(tooltip) = g.tooltip.take() {
                        tooltip.remove();
                    }
                }
                None => {}
            }
        }
        schedule_tooltip_wakeup(page);
    }

    /// Tooltip above the title, animated in on the next frame
    fn create_tooltip(el: &Elements) -> Option<HtmlElement> {
        let title = el.title.as_ref()?;
        let document = window().document()?;
        let tooltip: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        tooltip.set_class_name("long-press-tooltip");
        tooltip.set_inner_text(TOOLTIP_TEXT);
        el.body.append_child(&tooltip).ok()?;

        let rect = title.get_bounding_client_rect();
        set_style(&tooltip, "left", &format!("{}px", rect.left() + rect.width() / 2.0));
        set_style(&tooltip, "top", &format!("{}px", rect.top() - 10.0));
        set_style(&tooltip, "opacity", "0");
        set_style(&tooltip, "transform", "translate(-50%, -10px) scale(0.8)");

        let fading_in = tooltip.clone();
        let closure = Closure::once(move |_time: f64| {
            set_style(&fading_in, "opacity", "1");
            set_style(&fading_in, "transform", "translate(-50%, -30px) scale(1)");
        });
        let _ = window().request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();

        Some(tooltip)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_page::run().inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Midnight Reveal (native) starting...");
    log::info!("The page itself is web-only - run with `trunk serve`; doing a headless dry run");

    dry_run::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod dry_run {
    use midnight_reveal::Settings;
    use midnight_reveal::audio::{Playback, VolumeRamp};
    use midnight_reveal::renderer::CountingSurface;
    use midnight_reveal::sim::{
        Countdown, CountdownUpdate, Deadline, Fireworks, FireworksConfig, UnlockController,
        UnlockEffects,
    };

    /// One minute of animation at 60 Hz
    const FRAMES: u32 = 60 * 60;

    /// Player with no output device
    #[derive(Default)]
    struct SilentPlayer {
        playing: bool,
        volume: f64,
    }

    impl Playback for SilentPlayer {
        fn play(&mut self) {
            self.playing = true;
        }
        fn pause(&mut self) {
            self.playing = false;
        }
        fn is_paused(&self) -> bool {
            !self.playing
        }
        fn set_volume(&mut self, volume: f64) {
            self.volume = volume;
        }
    }

    struct HeadlessEffects<'a> {
        fireworks: &'a mut Fireworks,
        player: &'a mut SilentPlayer,
    }

    impl UnlockEffects for HeadlessEffects<'_> {
        fn hide_lock_screen(&mut self) {
            log::info!("[unlock] lock screen hidden");
        }
        fn reveal_content(&mut self) {
            log::info!("[unlock] content revealed");
        }
        fn schedule_scroll_into_view(&mut self, delay_ms: u32) {
            log::info!("[unlock] scroll into view in {delay_ms}ms");
        }
        fn flourish_sparkles(&mut self) {
            log::info!("[unlock] sparkles");
        }
        fn start_fireworks(&mut self) {
            self.fireworks.activate();
        }
        fn start_music_fade(&mut self, mut ramp: VolumeRamp) {
            ramp.start(&mut *self.player);
            let mut ticks = 0;
            while ramp.advance(&mut *self.player) {
                ticks += 1;
            }
            log::info!(
                "[unlock] music faded to {} over {} x {}ms",
                self.player.volume,
                ticks + 1,
                ramp.interval_ms()
            );
        }
        fn reveal_music_toggle(&mut self) {
            log::info!("[unlock] music toggle shown");
        }
        fn install_parallax(&mut self) {
            log::info!("[unlock] parallax listener (no sensor natively)");
        }
    }

    pub fn run() {
        let settings = Settings::load();
        let now = chrono::Local::now();

        let mut countdown = Countdown::new(Deadline::next_new_year(&now));
        match countdown.tick(now.timestamp_millis()) {
            Some(CountdownUpdate::Remaining(text)) => {
                let year = countdown.deadline().map(|d| d.year).unwrap_or_default();
                println!("{text} until {year}");
            }
            Some(CountdownUpdate::Expired) => println!("It's midnight!"),
            None => {}
        }

        let seed = now.timestamp_millis() as u64;
        let mut fireworks =
            Fireworks::new(1280.0, 720.0, seed, FireworksConfig::from(&settings));
        let mut player = SilentPlayer::default();
        let mut unlock = UnlockController::new(&settings);
        unlock.unlock(&mut HeadlessEffects {
            fireworks: &mut fireworks,
            player: &mut player,
        });

        let mut surface = CountingSurface::default();
        let mut peak = 0;
        for _ in 0..FRAMES {
            fireworks.frame(&mut surface);
            peak = peak.max(fireworks.particles().len());
        }
        println!(
            "{} frames: {} sparks drawn, peak {} live, {} live at end",
            fireworks.frames(),
            surface.circles,
            peak,
            fireworks.particles().len()
        );
    }
}
