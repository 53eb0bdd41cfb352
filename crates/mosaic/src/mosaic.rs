//! Mosaic: a drag-and-drop page builder.
//!
//! Widgets are dragged from the palette onto the canvas, reordered by
//! dragging, and edited in place. The canvas is saved after every change.

use crate::assets::Assets;
use canvas::{Canvas, CanvasEvent, FileStore};
use gpui::{
    actions, div, point, prelude::*, px, size, App, Application, Bounds, Entity, FocusHandle,
    Focusable, KeyBinding, Menu, MenuItem, Subscription, TitlebarOptions, Window, WindowBounds,
    WindowOptions,
};
use logger::MosaicLogger;
use settings::Settings;
use theme::Theme;
use ui::{CanvasView, PaletteView};

mod assets;
mod logger;
mod settings;

actions!(mosaic, [NewCanvas, Quit]);

/// Main application component
struct Mosaic {
    palette: Entity<PaletteView>,
    canvas_view: Entity<CanvasView>,
    focus_handle: FocusHandle,
    theme: Theme,
    _subscriptions: Vec<Subscription>,
}

impl Mosaic {
    fn new(theme: Theme, store: FileStore, cx: &mut Context<Self>) -> Self {
        let canvas = cx.new(|cx| Canvas::new(Box::new(store), cx));
        let palette = cx.new(|_| PaletteView::new(theme.clone()));
        let canvas_view = cx.new(|cx| CanvasView::new(canvas.clone(), theme.clone(), cx));
        let canvas_subscription = cx.subscribe(&canvas, Self::handle_canvas_event);

        Mosaic {
            palette,
            canvas_view,
            focus_handle: cx.focus_handle(),
            theme,
            _subscriptions: vec![canvas_subscription],
        }
    }

    fn handle_canvas_event(
        &mut self,
        _canvas: Entity<Canvas>,
        event: &CanvasEvent,
        _cx: &mut Context<Self>,
    ) {
        match event {
            CanvasEvent::WidgetAdded(id) => log::debug!("Widget added: {}", id),
            CanvasEvent::WidgetMoved { from, to } => {
                log::debug!("Widget moved: {} -> {}", from, to)
            }
            CanvasEvent::WidgetRemoved(id) => log::debug!("Widget removed: {}", id),
            CanvasEvent::ContentChanged(_) => {}
            CanvasEvent::Cleared => log::info!("Canvas cleared"),
        }
    }

    fn new_canvas(&mut self, _: &NewCanvas, _window: &mut Window, cx: &mut Context<Self>) {
        self.canvas_view.update(cx, |view, cx| view.clear(cx));
    }
}

impl Render for Mosaic {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id("Mosaic")
            .key_context("mosaic")
            .track_focus(&self.focus_handle)
            .size_full()
            .flex()
            .flex_row()
            .text_sm()
            .bg(self.theme.ui_background)
            .text_color(self.theme.ui_text)
            .on_action(cx.listener(Self::new_canvas))
            // Left: widget palette
            .child(
                div()
                    .p(px(8.0))
                    .pt(px(32.0)) // Space for traffic lights
                    .h_full()
                    .child(self.palette.clone()),
            )
            // Center: canvas (takes remaining space)
            .child(
                div()
                    .flex()
                    .flex_1()
                    .h_full()
                    .pt(px(24.0))
                    .child(self.canvas_view.clone()),
            )
    }
}

impl Focusable for Mosaic {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

fn init_keymap(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("cmd-n", NewCanvas, None),
        KeyBinding::new("cmd-q", Quit, None),
    ]);
}

fn main() {
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    match Settings::config_dir() {
        Ok(dir) => {
            if let Err(e) = MosaicLogger::init(settings.level_filter(), &dir.join("logs")) {
                eprintln!("Failed to initialize logger: {:#}", e);
            }
        }
        Err(e) => eprintln!("Failed to initialize logger: {:#}", e),
    }
    if let Some(e) = settings_error {
        log::warn!("Using default settings: {:#}", e);
    }

    let store = match settings.store_dir() {
        Ok(dir) => FileStore::in_dir(dir),
        Err(e) => {
            log::error!("No location to store the canvas: {:#}", e);
            return;
        }
    };
    log::info!("Canvas store: {}", store.path().display());

    Application::new().with_assets(Assets).run(move |cx: &mut App| {
        cx.on_action(quit);

        cx.set_menus(vec![
            Menu {
                name: "Mosaic".into(),
                items: vec![MenuItem::action("Quit", Quit)],
            },
            Menu {
                name: "File".into(),
                items: vec![MenuItem::action("New Canvas", NewCanvas)],
            },
        ]);

        init_keymap(cx);

        let theme = Theme::for_mode(settings.theme);
        let bounds = Bounds::centered(
            None,
            size(px(settings.window_width), px(settings.window_height)),
            cx,
        );
        let window = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some("Mosaic".into()),
                    appears_transparent: true,
                    traffic_light_position: Some(point(px(8.0), px(8.0))),
                }),
                ..Default::default()
            },
            |_window, cx| cx.new(|cx| Mosaic::new(theme, store, cx)),
        );

        let window = match window {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to open window: {:#}", e);
                cx.quit();
                return;
            }
        };

        window
            .update(cx, |view, window, cx| {
                window.focus(&view.focus_handle(cx));
                cx.activate(true);
            })
            .ok();
    });
}

fn quit(_: &Quit, cx: &mut App) {
    cx.quit();
}
