const BRAND_NAME: &str = "Waitlist Gateway";

/// Plain-text and HTML bodies for the "you've been approved" message.
/// Returns `(subject, text, html)`.
pub fn approval_email(name: &str, token: &str) -> (String, String, String) {
    let subject = format!("Your {} token", BRAND_NAME);

    let text = format!(
        "Hello, {name}!\n\n\
         Thanks for waiting. Your registration has been approved.\n\n\
         Your token is:\n\n\
         {token}\n\n\
         Keep it private; anyone holding it can use your quota.\n\n\
         Thank you! Have a great day."
    );

    let html = format!(
        r#"<p style="margin:0;font-weight:600;">Hello, {name}!</p>
<p style="margin:12px 0 0;color:#374151;">Thanks for waiting. Your registration has been approved.</p>
<p style="margin:12px 0 0;color:#374151;">Your token is:</p>
<pre style="margin:12px 0 0;padding:12px;background-color:#f3f4f6;border-radius:8px;">{token}</pre>
<p style="margin:12px 0 0;color:#6b7280;">Keep it private; anyone holding it can use your quota.</p>"#,
        name = escape_html(name),
        token = escape_html(token),
    );

    (subject, text, html)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
