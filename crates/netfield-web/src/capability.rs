use netfield::Capabilities;
use web_sys::Window;

fn media_matches(window: &Window, query: &str) -> bool {
    match window.match_media(query) {
        Ok(Some(list)) => list.matches(),
        Ok(None) => false,
        Err(err) => {
            log::debug!("matchMedia({}) failed: {:?}", query, err);
            false
        }
    }
}

/// Probe the browser for hover support, a fine pointer and a touch user agent.
pub fn detect(window: &Window) -> Capabilities {
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    Capabilities {
        hover: media_matches(window, "(hover: hover)"),
        fine_pointer: media_matches(window, "(pointer: fine)"),
        touch_user_agent: Capabilities::is_touch_agent(&user_agent),
    }
}
