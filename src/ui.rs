use crate::app::Presenter;
use crate::backend::{BackendError, BackendResult};
use crate::config::{Settings, WindowSettings};
use crate::models::{Credential, NetworkIdentity};
use crate::payload::wifi_payload;
use crate::qr::{self, QrBitmap};
use gtk4::gdk::{Display, MemoryFormat, MemoryTexture};
use gtk4::gio::ApplicationFlags;
use gtk4::glib::{self, ExitCode};
use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, Button, CssProvider, Label,
    Orientation, Picture,
};
use tracing::{debug, warn};

pub struct GtkPresenter {
    settings: Settings,
}

impl GtkPresenter {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Presenter for GtkPresenter {
    fn present(&self, identity: &NetworkIdentity, credential: &Credential) -> BackendResult<()> {
        let bitmap = qr::render(&wifi_payload(identity, credential), &self.settings.qr)?;
        debug!(edge = bitmap.edge, "rendered QR code");

        gtk4::init().map_err(|e| BackendError::RenderError(e.to_string()))?;

        let window_settings = self.settings.window.clone();
        let heading = format!("Connect to: {identity}");
        let status = run_application(&self.settings.app_id, move |app| {
            build_qr_window(app, &window_settings, &heading, &bitmap)
        });

        if status != ExitCode::SUCCESS {
            return Err(BackendError::RenderError(
                "GTK application exited abnormally".to_string(),
            ));
        }
        Ok(())
    }
}

/// Best-effort error window; silently skipped when no display is available.
pub fn show_error(settings: &Settings, message: &str) {
    if let Err(err) = gtk4::init() {
        warn!(error = %err, "cannot open display for error dialog");
        return;
    }

    let window_settings = settings.window.clone();
    let message = message.to_string();
    run_application(&settings.app_id, move |app| {
        build_error_window(app, &window_settings, &message)
    });
}

fn run_application(app_id: &str, build: impl Fn(&Application) + 'static) -> ExitCode {
    let app = Application::builder()
        .application_id(app_id)
        .flags(ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(build);
    app.run_with_args::<&str>(&[])
}

fn build_qr_window(
    app: &Application,
    settings: &WindowSettings,
    heading: &str,
    bitmap: &QrBitmap,
) {
    load_css(settings);

    let window = ApplicationWindow::builder()
        .application(app)
        .title(settings.title.as_str())
        .default_width(settings.width)
        .default_height(settings.height)
        .build();

    let frame = GtkBox::new(Orientation::Vertical, 0);
    frame.set_margin_top(10);
    frame.set_margin_bottom(10);
    frame.set_margin_start(10);
    frame.set_margin_end(10);

    let label = Label::new(Some(heading));
    label.add_css_class("wisharify-heading");
    label.set_margin_top(10);
    label.set_margin_bottom(5);

    let picture = Picture::for_paintable(&texture_from(bitmap));
    let edge = bitmap.edge as i32;
    picture.set_size_request(edge, edge);
    picture.set_halign(Align::Center);
    picture.set_vexpand(true);
    picture.set_margin_top(5);
    picture.set_margin_bottom(10);

    frame.append(&label);
    frame.append(&picture);
    frame.append(&dismiss_button("Exit", &window));

    window.set_child(Some(&frame));
    window.present();
}

fn build_error_window(app: &Application, settings: &WindowSettings, message: &str) {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Error")
        .resizable(false)
        .build();

    let frame = GtkBox::new(Orientation::Vertical, 12);
    frame.set_margin_top(16);
    frame.set_margin_bottom(16);
    frame.set_margin_start(16);
    frame.set_margin_end(16);

    let label = Label::new(Some(message));
    label.set_wrap(true);
    label.set_max_width_chars(settings.width / 12);

    frame.append(&label);
    frame.append(&dismiss_button("Close", &window));

    window.set_child(Some(&frame));
    window.present();
}

fn dismiss_button(text: &str, window: &ApplicationWindow) -> Button {
    let button = Button::with_label(text);
    button.set_halign(Align::Center);
    button.set_margin_top(10);
    let window = window.clone();
    button.connect_clicked(move |_| window.close());
    button
}

fn texture_from(bitmap: &QrBitmap) -> MemoryTexture {
    let edge = bitmap.edge as i32;
    MemoryTexture::new(
        edge,
        edge,
        MemoryFormat::R8g8b8,
        &glib::Bytes::from(bitmap.pixels.as_slice()),
        bitmap.stride(),
    )
}

fn load_css(settings: &WindowSettings) {
    let css = format!(
        r#"
    .wisharify-heading {{
        font-family: "{}";
        font-size: {}pt;
    }}
    "#,
        settings.font_family, settings.font_size_pt
    );

    let provider = CssProvider::new();
    provider.load_from_data(&css);

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
