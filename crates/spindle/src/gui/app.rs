use crate::config::{self, AudioConfig, SoundSlot};
use crate::events::AppEvent;
use crate::gui::audio::AudioDeck;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, PLACEHOLDER, WHEEL_SIZE};
use crate::gui::window;
use crate::sys::monitor;
use flywheel::{Label, Point, Wheel, WheelAction, WheelEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub visible: bool,
    pub result: String,
    pub can_remove: bool,
    pub audio: AudioDeck,
    pub audio_config: AudioConfig,
    pub ticking: Rc<Cell<bool>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    pub entry: gtk::Entry,
    pub tags: gtk::FlowBox,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    Resize(i32, i32),
    DragBegin(Point, Duration),
    DragUpdate(Point, Duration),
    DragEnd,
    DragCancel,
    Fling(f64),
    Frame(WheelAction),
    AddFromEntry,
    Add(Label),
    RemoveCurrent,
    RemoveAt(usize),
    PickSound(SoundSlot),
    SoundPicked(SoundSlot, PathBuf),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::Spin(v) => AppMsg::Fling(v),
            AppEvent::Add(label) => AppMsg::Add(label),
            AppEvent::Remove => AppMsg::RemoveCurrent,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn monotonic_now() -> Duration {
    Duration::from_micros(glib::monotonic_time().max(0) as u64)
}

/// GDK event times are milliseconds; 0 means the event carried none.
fn event_timestamp(millis: u32) -> Option<Duration> {
    (millis != 0).then(|| Duration::from_millis(u64::from(millis)))
}

/// When the controller's current event happened. Messages reach `update`
/// later than that, so drag samples must be stamped here.
fn event_time(controller: &impl IsA<gtk::EventController>) -> Duration {
    event_timestamp(controller.current_event_time()).unwrap_or_else(monotonic_now)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Wheel, AudioConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Spindle"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "spindle-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_halign: gtk::Align::Center,
                set_valign: gtk::Align::Center,
                add_css_class: "spindle-panel",

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: WHEEL_SIZE,
                    set_content_height: WHEEL_SIZE,
                    add_css_class: "spindle-wheel",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |gesture, x, y| {
                            let at = event_time(gesture);
                            sender.input(AppMsg::DragBegin(Point::new(x, y), at));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                let at = event_time(gesture);
                                sender.input(AppMsg::DragUpdate(Point::new(x + dx, y + dy), at));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::DragEnd);
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::DragCancel);
                        },
                    },
                },

                gtk::Label {
                    add_css_class: "spindle-result",
                    #[watch]
                    set_label: &model.result,
                },

                gtk::Button {
                    set_label: "Remove current",
                    #[watch]
                    set_sensitive: model.can_remove,
                    connect_clicked => AppMsg::RemoveCurrent,
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 6,

                    #[name = "entry"]
                    gtk::Entry {
                        set_hexpand: true,
                        set_placeholder_text: Some("New wedge"),
                        connect_activate => AppMsg::AddFromEntry,
                    },

                    gtk::Button {
                        set_label: "Add",
                        connect_clicked => AppMsg::AddFromEntry,
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 6,
                    set_halign: gtk::Align::Center,

                    gtk::Button {
                        set_label: "Spin sound…",
                        connect_clicked => AppMsg::PickSound(SoundSlot::Spin),
                    },

                    gtk::Button {
                        set_label: "Result sound…",
                        connect_clicked => AppMsg::PickSound(SoundSlot::Result),
                    },
                },

                #[name = "tags"]
                gtk::FlowBox {
                    set_selection_mode: gtk::SelectionMode::None,
                    set_max_children_per_line: 6,
                    set_row_spacing: 4,
                    set_column_spacing: 4,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (wheel, audio_config, rx) = init;

        theme::load_css();
        window::init_overlay(&root);

        let model = AppModel {
            wheel: Rc::new(RefCell::new(wheel)),
            visible: false,
            result: String::new(),
            can_remove: false,
            audio: AudioDeck::from_config(&audio_config),
            audio_config,
            ticking: Rc::new(Cell::new(false)),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            entry: gtk::Entry::default(),
            tags: gtk::FlowBox::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.entry = widgets.entry.clone();
        model.tags = widgets.tags.clone();

        let wheel_draw = model.wheel.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = wheel::draw(cr, &wheel_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        model.refresh();
        model.rebuild_tags(&sender);
        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => {
                self.visible = false;
            }
            AppMsg::Toggle => {
                if self.visible {
                    self.visible = false;
                } else {
                    self.show();
                }
            }
            AppMsg::Resize(width, height) => {
                let center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
                self.wheel.borrow_mut().set_center(center);
                self.drawing_area.queue_draw();
            }
            AppMsg::DragBegin(point, at) => {
                let action = self.wheel.borrow_mut().pointer_down(point, at);
                self.apply(action, &sender);
                self.rebuild_tags(&sender);
            }
            AppMsg::DragUpdate(point, at) => {
                let action = self.wheel.borrow_mut().pointer_move(point, at);
                self.apply(action, &sender);
            }
            AppMsg::DragEnd => {
                let action = self.wheel.borrow_mut().pointer_up();
                self.apply(action, &sender);
            }
            AppMsg::DragCancel => {
                let action = self.wheel.borrow_mut().pointer_cancel();
                self.apply(action, &sender);
            }
            AppMsg::Fling(velocity) => {
                let action = self.wheel.borrow_mut().fling(velocity);
                self.apply(action, &sender);
            }
            AppMsg::Frame(action) => self.apply(action, &sender),
            AppMsg::AddFromEntry => {
                let text = self.entry.text();
                match self.wheel.borrow_mut().add(&text) {
                    Ok(_) => self.entry.set_text(""),
                    Err(e) => log::debug!("Not adding wedge: {}", e),
                }
                self.wedges_changed(&sender);
            }
            AppMsg::Add(label) => {
                if let Err(e) = self.wheel.borrow_mut().add(&label) {
                    log::debug!("Not adding wedge: {}", e);
                }
                self.wedges_changed(&sender);
            }
            AppMsg::RemoveCurrent => {
                if let Err(e) = self.wheel.borrow_mut().remove_current() {
                    log::debug!("Not removing wedge: {}", e);
                }
                self.wedges_changed(&sender);
            }
            AppMsg::RemoveAt(index) => {
                if let Err(e) = self.wheel.borrow_mut().remove(index) {
                    log::debug!("Not removing wedge: {}", e);
                }
                self.wedges_changed(&sender);
            }
            AppMsg::PickSound(slot) => self.pick_sound(slot, &sender),
            AppMsg::SoundPicked(slot, path) => {
                log::info!("Using {} for the {:?} sound", path.display(), slot);
                self.audio_config.set_sound(slot, path);
                self.audio = AudioDeck::from_config(&self.audio_config);
            }
            AppMsg::ConfigReload => self.reload_config(&sender),
        }
    }
}

impl AppModel {
    fn show(&mut self) {
        if let Some(name) = monitor::get_active_monitor() {
            window::place_on_monitor(&self.root, &name);
        }
        self.visible = true;
        self.refresh();
        self.drawing_area.queue_draw();
    }

    /// Opens a file dialog for one of the sounds. The overlay sits above
    /// every normal window, so it steps aside until the dialog closes.
    fn pick_sound(&mut self, slot: SoundSlot, sender: &ComponentSender<Self>) {
        let filter = gtk::FileFilter::new();
        filter.set_name(Some("Audio"));
        filter.add_mime_type("audio/*");
        let filters = gtk::gio::ListStore::new::<gtk::FileFilter>();
        filters.append(&filter);

        let dialog = gtk::FileDialog::builder()
            .title(slot.title())
            .filters(&filters)
            .default_filter(&filter)
            .build();

        self.visible = false;
        let sender = sender.clone();
        dialog.open(
            None::<&gtk::Window>,
            gtk::gio::Cancellable::NONE,
            move |res| {
                match res {
                    Ok(file) => match file.path() {
                        Some(path) => sender.input(AppMsg::SoundPicked(slot, path)),
                        None => log::warn!("Picked sound has no local path: {}", file.uri()),
                    },
                    Err(e) => log::debug!("No sound picked: {}", e),
                }
                sender.input(AppMsg::Show);
            },
        );
    }

    /// Reacts to whatever the wheel reported.
    fn apply(&mut self, action: WheelAction, sender: &ComponentSender<Self>) {
        if let Some(event) = &action.event {
            self.audio.handle(event);
            if matches!(
                event,
                WheelEvent::Settled { .. } | WheelEvent::SpinStarted(_)
            ) {
                self.rebuild_tags(sender);
            }
        }
        if action.should_tick {
            self.start_ticking(sender);
        }
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
        self.refresh();
    }

    /// Drives the spin from the frame clock until the wheel asks to stop.
    fn start_ticking(&self, sender: &ComponentSender<Self>) {
        if self.ticking.replace(true) {
            return;
        }
        let wheel = self.wheel.clone();
        let ticking = self.ticking.clone();
        let sender = sender.clone();

        self.drawing_area.add_tick_callback(move |_, clock| {
            let now = Duration::from_micros(clock.frame_time().max(0) as u64);
            let action = wheel.borrow_mut().tick(now);
            let keep_going = action.should_tick;
            sender.input(AppMsg::Frame(action));

            if keep_going {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    fn refresh(&mut self) {
        let wheel = self.wheel.borrow();
        self.result = wheel
            .current()
            .map(|l| l.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        self.can_remove = wheel.can_remove_current();
    }

    fn wedges_changed(&mut self, sender: &ComponentSender<Self>) {
        self.rebuild_tags(sender);
        self.refresh();
        self.drawing_area.queue_draw();
    }

    fn rebuild_tags(&self, sender: &ComponentSender<Self>) {
        while let Some(child) = self.tags.first_child() {
            self.tags.remove(&child);
        }

        let wheel = self.wheel.borrow();
        let removable = wheel.can_remove_current();
        for (index, label) in wheel.wedges().iter().enumerate() {
            let tag = gtk::Box::new(gtk::Orientation::Horizontal, 4);
            tag.add_css_class("spindle-tag");
            tag.append(&gtk::Label::new(Some(label.as_str())));

            let button = gtk::Button::with_label("×");
            button.add_css_class("flat");
            button.set_tooltip_text(Some("Remove"));
            button.set_sensitive(removable);
            let sender = sender.clone();
            button.connect_clicked(move |_| sender.input(AppMsg::RemoveAt(index)));
            tag.append(&button);

            self.tags.insert(&tag, -1);
        }
    }

    fn reload_config(&mut self, sender: &ComponentSender<Self>) {
        match config::load_config() {
            Ok(new_config) => {
                {
                    let mut wheel = self.wheel.borrow_mut();
                    wheel.set_tuning(new_config.physics.clone());
                    wheel.set_pointer(new_config.pointer);
                    if let Err(e) = wheel.replace_wedges(new_config.wedge_list()) {
                        log::warn!("Keeping current wedges: {}", e);
                    }
                }
                self.audio = AudioDeck::from_config(&new_config.audio);
                self.audio_config = new_config.audio;
                self.wedges_changed(sender);
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}
