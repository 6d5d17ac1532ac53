const UNKNOWN: &str = "·";

/// Glyph shown next to an application name. Matching ignores case.
pub fn application_icon(application: &str) -> &'static str {
    match application.to_lowercase().as_str() {
        "firefox" => "🦊",
        "gnome-terminal" => ">_",
        _ => UNKNOWN,
    }
}

pub fn general_icon(name: &str) -> &'static str {
    match name {
        "bell" => "🔔",
        "check" => "✔",
        _ => UNKNOWN,
    }
}
