//! Site footer with the copyright line.

#[cfg(test)]
#[path = "footer_test.rs"]
mod footer_test;

use leptos::prelude::*;

#[component]
pub fn Footer(app_name: String) -> impl IntoView {
    let year = time::OffsetDateTime::now_utc().year();
    view! {
        <footer class="site-footer">
            <p>{copyright_line(year, &app_name)}</p>
        </footer>
    }
}

fn copyright_line(year: i32, app_name: &str) -> String {
    format!("© {year} {app_name}. All rights reserved.")
}
