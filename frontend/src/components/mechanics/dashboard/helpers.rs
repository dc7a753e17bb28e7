//! Browser-side helpers for the mechanic dashboard.
//!
//! - **User Feedback**: `show_notice` renders a `Notice` from the board as a
//!   temporary toast at the bottom of the screen.
//! - **Export plumbing**: `export_options` reads today's date and the local
//!   UTC offset from the browser clock; `download_csv` hands a `CsvExport` to
//!   the browser as a file download.
//! - **Formatting**: badge classes, thousands separators and local timestamps.

use crate::config::TOAST_MILLIS;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use common::board::export::{local_timestamp, CsvExport, ExportOptions};
use common::board::{Notice, NoticeLevel};
use common::model::{RequestStatus, ServiceRequest};
use gloo_file::{Blob, ObjectUrl};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, HtmlElement};

/// Displays a notice as a toast that removes itself after `TOAST_MILLIS`.
pub fn show_notice(notice: &Notice) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    let title = document.create_element("strong").ok();
    if let Some(title) = &title {
        title.set_text_content(Some(&notice.title));
        toast.append_child(title).ok();
    }
    let description = document.create_element("div").ok();
    if let Some(description) = &description {
        description.set_text_content(Some(&notice.description));
        toast.append_child(description).ok();
    }

    let html_toast: HtmlElement = toast.unchecked_into();
    let background = match notice.level {
        NoticeLevel::Info => "rgba(0, 0, 0, 0.85)",
        NoticeLevel::Destructive => "#d32f2f",
    };
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("right", "20px").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Today's date (UTC, as in an ISO timestamp) and the browser's UTC offset.
pub fn export_options() -> ExportOptions {
    let now = js_sys::Date::new_0();
    let today = NaiveDate::from_ymd_opt(
        now.get_utc_full_year() as i32,
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
    .unwrap_or_default();
    // `getTimezoneOffset` is minutes *behind* UTC.
    let offset_secs = -(now.get_timezone_offset() as i32) * 60;
    let offset = FixedOffset::east_opt(offset_secs).unwrap_or(Utc.fix());
    ExportOptions { today, offset }
}

/// Offers `file` as a download through a temporary object URL.
pub fn download_csv(file: &CsvExport) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;

    let blob = Blob::new_with_options(file.content.as_str(), Some(file.mime_type()));
    let url = ObjectUrl::from(blob);

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Cannot create download link")?
        .dyn_into()
        .map_err(|_| "Download link is not an anchor")?;
    anchor.set_href(&url);
    anchor.set_download(&file.file_name);
    anchor.click();

    // Revoking the URL right away can cancel the download in some browsers.
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(1000).await;
        drop(url);
    });
    Ok(())
}

/// Badge variant for a status, as CSS class.
pub fn status_badge_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Accepted => "badge badge-default",
        RequestStatus::Completed => "badge badge-outline",
        RequestStatus::Rejected | RequestStatus::Cancelled => "badge badge-destructive",
        _ => "badge badge-secondary",
    }
}

pub fn format_count(count: usize) -> String {
    count.to_formatted_string(&Locale::en)
}

/// `createdAt` in the browser's local time.
pub fn requested_at(request: &ServiceRequest) -> String {
    local_timestamp(request.created_at, export_options().offset)
}
