use parking_lot::Mutex;

use cityweather_core::{ViewState, ViewSurface};

/// Prints each view change to stdout.
///
/// Only the parts that changed since the previous frame are printed, so a
/// lookup reads as "status, then result" instead of repeating the panel.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    last: Mutex<ViewState>,
}

impl ViewSurface for TerminalSurface {
    fn render(&self, view: &ViewState) {
        let mut last = self.last.lock();

        if last.status != view.status && !view.status.is_empty() {
            let prefix = if view.status.is_error { "error: " } else { "" };
            println!("{prefix}{}", view.status.message);
        }

        if last.result != view.result {
            if let Some(result) = &view.result {
                println!();
                print!("{}", format_result(view));
                println!("  (observed {})", result.observed_at);
            }
        }

        *last = view.clone();
    }
}

/// The result panel as a block of aligned lines.
pub fn format_result(view: &ViewState) -> String {
    let Some(r) = &view.result else {
        return String::new();
    };

    let rows = [
        ("City", r.city.clone()),
        ("Conditions", r.description.clone()),
        ("Temperature", format!("{} °C", r.temperature)),
        ("Feels like", format!("{} °C", r.apparent_temperature)),
        ("Humidity", format!("{} %", r.humidity)),
        ("Wind", format!("{} km/h from {}°", r.wind_speed, r.wind_direction)),
    ];

    rows.iter().map(|(label, value)| format!("  {label:<12} {value}\n")).collect()
}
