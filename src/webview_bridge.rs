//! Scripts injected into the tunnel page that answer back through the prompt bridge.

use serde_json::Value;

use crate::domain::bridge::{BRIDGE_URL_PREFIX, REQUEST_DONE_TOKEN};

pub fn bridge_url(callback_id: &str) -> String {
    format!("{BRIDGE_URL_PREFIX}{callback_id}")
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Evaluate `source` in the page, reporting `[result]` to `callback_id` when given.
pub fn script_code_wrapper(source: &str, callback_id: Option<&str>) -> String {
    match callback_id {
        Some(callback_id) => format!(
            "(function(){{prompt(JSON.stringify([eval({source})]), {url})}})()",
            source = js_string(source),
            url = js_string(&bridge_url(callback_id)),
        ),
        None => source.to_string(),
    }
}

pub fn script_file_wrapper(src: &str, callback_id: Option<&str>) -> String {
    let onload = match callback_id {
        Some(callback_id) => format!(
            " c.onload = function() {{ prompt('', {url}); }};",
            url = js_string(&bridge_url(callback_id)),
        ),
        None => String::new(),
    };
    format!(
        "(function(d) {{ var c = d.createElement('script'); c.src = {src};{onload} d.body.appendChild(c); }})(document)",
        src = js_string(src),
    )
}

pub fn style_code_wrapper(css: &str, callback_id: Option<&str>) -> String {
    format!(
        "(function(d) {{ var c = d.createElement('style'); c.innerHTML = {css}; d.body.appendChild(c);{ack} }})(document)",
        css = js_string(css),
        ack = acknowledgement(callback_id),
    )
}

pub fn style_file_wrapper(href: &str, callback_id: Option<&str>) -> String {
    format!(
        "(function(d) {{ var c = d.createElement('link'); c.rel = 'stylesheet'; c.type = 'text/css'; c.href = {href}; d.head.appendChild(c);{ack} }})(document)",
        href = js_string(href),
        ack = acknowledgement(callback_id),
    )
}

fn acknowledgement(callback_id: Option<&str>) -> String {
    match callback_id {
        Some(callback_id) => format!(" prompt('', {});", js_string(&bridge_url(callback_id))),
        None => String::new(),
    }
}

/// JSON POST issued from inside the page; completion is reported to `gap-iab://requestdone`.
pub fn json_post_script(url: &str, params: &Value) -> String {
    let done_url = js_string(&bridge_url(REQUEST_DONE_TOKEN));
    format!(
        r#"(function() {{
  var oReq = new XMLHttpRequest();
  oReq.onload = function() {{
    window._HTML = '<html><body>' + this.responseText + '</body></html>';
    prompt(JSON.stringify([this.status, this.statusText]), {done_url});
  }};
  oReq.onerror = function() {{
    window._HTML = '<html><body>' + this.responseText + '</body></html>';
    prompt(JSON.stringify([this.status, 'Load error']), {done_url});
  }};
  oReq.open('post', {url});
  oReq.setRequestHeader('Content-Type', 'application/json;charset=UTF-8');
  oReq.send(JSON.stringify({params}));
}})();"#,
        done_url = done_url,
        url = js_string(url),
        params = params,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bridge::BridgeCommand;
    use crate::security::bridge_policy::parse_bridge_command;
    use serde_json::json;

    #[test]
    fn bridge_url_round_trips_through_the_policy() {
        let url = bridge_url("LocalTunnel12");
        assert_eq!(url, "gap-iab://LocalTunnel12");
        assert_eq!(
            parse_bridge_command("about:blank", Some(&url)),
            BridgeCommand::ResultCallback {
                callback_id: "LocalTunnel12".to_string()
            }
        );
    }

    #[test]
    fn script_code_is_json_escaped_inside_eval() {
        let script = script_code_wrapper("document.title = \"x\"", Some("LocalTunnel3"));
        assert_eq!(
            script,
            r#"(function(){prompt(JSON.stringify([eval("document.title = \"x\"")]), "gap-iab://LocalTunnel3")})()"#
        );
    }

    #[test]
    fn script_code_without_callback_is_injected_verbatim() {
        assert_eq!(script_code_wrapper("run()", None), "run()");
    }

    #[test]
    fn file_and_style_wrappers_ack_only_with_callback() {
        let with_ack = script_file_wrapper("https://cdn.local/a.js", Some("LocalTunnel4"));
        assert!(with_ack.contains(r#"c.src = "https://cdn.local/a.js";"#));
        assert!(with_ack.contains(r#"prompt('', "gap-iab://LocalTunnel4")"#));
        assert!(!script_file_wrapper("a.js", None).contains("prompt"));

        let css = style_code_wrapper("body { color: red }", Some("LocalTunnel5"));
        assert!(css.contains(r#"c.innerHTML = "body { color: red }";"#));
        assert!(css.contains("gap-iab://LocalTunnel5"));
        assert!(!style_code_wrapper("p {}", None).contains("prompt"));

        let link = style_file_wrapper("/site.css", Some("LocalTunnel6"));
        assert!(link.contains(r#"c.href = "/site.css";"#));
        assert!(link.contains("d.head.appendChild(c);"));
        assert!(!style_file_wrapper("/site.css", None).contains("prompt"));
    }

    #[test]
    fn json_post_reports_to_request_done() {
        let script = json_post_script("https://api.local/login?next='x'", &json!({ "user": "a" }));
        assert!(script.contains(r#"oReq.open('post', "https://api.local/login?next='x'");"#));
        assert!(script.contains(r#"JSON.stringify({"user":"a"})"#));
        assert_eq!(script.matches(r#""gap-iab://requestdone""#).count(), 2);
    }
}
