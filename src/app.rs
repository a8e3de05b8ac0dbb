use std::time::Duration;

use egui::{Rect, Sense};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::event::{CanvasEvent, EventQueue, MenuItem};
use crate::input::{route_gesture, GestureRecognizer, InputHandler, TouchDelay, TouchPairing};
use crate::palette::PaletteColor;
use crate::renderer::Renderer;
use crate::view::DrawView;

/// How often to wake up while a tap or long press timer is running.
const TIMER_REPAINT: Duration = Duration::from_millis(30);

/// We derive Deserialize/Serialize so we can persist the palette choice on
/// shutdown. Drawings themselves are never persisted.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct Settings {
    color: PaletteColor,
}

#[derive(Debug, Clone)]
struct ContextMenu {
    anchor: Rect,
    items: Vec<MenuItem>,
}

pub struct TouchTrackerApp {
    view: DrawView,
    renderer: Renderer,
    input: InputHandler,
    pairing: TouchPairing,
    delay: TouchDelay,
    gestures: GestureRecognizer,
    host_events: EventQueue,
    menu: Option<ContextMenu>,
}

impl TouchTrackerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut app = Self::with_config(config);

        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value::<Settings>(storage, eframe::APP_KEY) {
                log::info!("Restoring palette color {}", settings.color.label());
                app.view.set_current_color(settings.color);
                app.host_events.drain();
            }
        }

        app
    }

    pub fn with_config(config: Config) -> Self {
        let gestures = GestureRecognizer::new(config.gestures.clone());
        let delay = TouchDelay::new(config.gestures.tap_slop, config.gestures.multi_tap_time);
        let view = DrawView::new(config);
        let host_events = EventQueue::new();
        view.subscribe(Box::new(host_events.clone()));

        Self {
            view,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            pairing: TouchPairing::new(),
            delay,
            gestures,
            host_events,
            menu: None,
        }
    }

    pub fn view(&self) -> &DrawView {
        &self.view
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let (events, time) = ctx.input(|i| (i.events.clone(), i.time));
        if self.handle_events(&events, time) {
            ctx.request_repaint_after(TIMER_REPAINT);
        }
    }

    /// Feeds one frame of raw events into the drawing surface: touches go
    /// through pairing and the touch delay, while the gesture recognizer sees
    /// them raw. Returns whether a timer needs another frame.
    fn handle_events(&mut self, events: &[egui::Event], time: f64) -> bool {
        for batch in self.input.process_events(events) {
            for paired in self.pairing.process(&batch) {
                for visible in self.delay.filter(&paired, time) {
                    self.view.handle_touch_batch(&visible);
                }
            }
            for gesture in self.gestures.on_batch(&batch, time) {
                route_gesture(&gesture, &mut self.view);
            }
        }

        for released in self.delay.poll(time) {
            self.view.handle_touch_batch(&released);
        }
        for gesture in self.gestures.poll(time) {
            route_gesture(&gesture, &mut self.view);
        }

        self.delay.is_holding() || self.gestures.needs_poll()
    }

    fn apply_host_events(&mut self, ctx: &egui::Context) {
        for event in self.host_events.drain() {
            match event {
                CanvasEvent::RedrawRequested => ctx.request_repaint(),
                CanvasEvent::ContextMenuRequested { anchor, items } => {
                    self.menu = Some(ContextMenu { anchor, items });
                    ctx.request_repaint();
                }
                CanvasEvent::ContextMenuHidden => {
                    if self.menu.take().is_some() {
                        ctx.request_repaint();
                    }
                }
            }
        }
    }

    fn show_context_menu(&mut self, ctx: &egui::Context) {
        let Some(menu) = &self.menu else {
            self.input.set_blocked_rect(None);
            return;
        };

        let mut chosen = None;
        let area = egui::Area::new(egui::Id::new("touch_tracker_context_menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(menu.anchor.left_bottom())
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for item in &menu.items {
                            if ui.button(item.title()).clicked() {
                                chosen = Some(*item);
                            }
                        }
                    });
                });
            });
        self.input.set_blocked_rect(Some(area.response.rect));

        match chosen {
            Some(MenuItem::Delete) => self.view.delete_selected(),
            Some(MenuItem::Color(color)) => self.view.set_current_color(color),
            None => {}
        }
    }
}

impl eframe::App for TouchTrackerApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = Settings {
            color: self.view.current_color(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
                let rect = response.rect;
                self.view.set_bounds(rect);
                self.input.set_canvas_rect(rect);

                self.handle_input(ctx);
                self.apply_host_events(ctx);

                let snapshot = self.view.snapshot();
                self.renderer.render(
                    &painter,
                    rect,
                    &snapshot,
                    self.view.current_color().color32(),
                );
            });

        self.show_context_menu(ctx);
        self.apply_host_events(ctx);
    }
}
