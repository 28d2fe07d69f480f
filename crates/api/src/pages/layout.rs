use chrono::{DateTime, Datelike, NaiveDate, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Posts every `form[data-json]` as a JSON body, the only encoding the form
/// endpoints accept. Checkboxes become booleans.
const FORM_SCRIPT: &str = r#"
document.querySelectorAll("form[data-json]").forEach((form) => {
  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    const body = {};
    for (const el of form.elements) {
      if (!el.name) continue;
      body[el.name] = el.type === "checkbox" ? el.checked : el.value;
    }
    const status = form.querySelector(".form-status");
    try {
      const res = await fetch(form.action, {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(body),
      });
      const data = await res.json().catch(() => ({}));
      if (status) status.textContent = data.message || data.error || "";
      if (res.ok) form.reset();
    } catch (err) {
      if (status) status.textContent = "Could not send the form. Please try again.";
    }
  });
});
"#;

const NAV: [(&str, &str); 6] = [
    ("/insights/blogs", "Insights"),
    ("/services/training", "Training"),
    ("/about/our-people", "Our People"),
    ("/about/customer-stories", "Customer Stories"),
    ("/about/gallery", "Gallery"),
    ("/#contact", "Contact"),
];

/// Wrap page content in the site chrome.
pub fn page(site_name: &str, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (site_name) }
            }
            body {
                header.site-header {
                    a.brand href="/" { (site_name) }
                    nav {
                        ul {
                            @for (href, label) in NAV {
                                li { a href=(href) { (label) } }
                            }
                        }
                    }
                }
                main { (content) }
                footer.site-footer {
                    (newsletter_form())
                    p { "© " (Utc::now().year()) " " (site_name) }
                }
                script { (PreEscaped(FORM_SCRIPT)) }
            }
        }
    }
}

fn newsletter_form() -> Markup {
    html! {
        form.newsletter method="post" action="/api/newsletter" data-json="true" {
            label for="newsletter-email" { "Subscribe to our newsletter" }
            input id="newsletter-email" type="email" name="email" required;
            button type="submit" { "Subscribe" }
            p.form-status role="status" {}
        }
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn format_day(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn not_found_page(site_name: &str) -> Markup {
    page(
        site_name,
        "Page not found",
        html! {
            section.not-found {
                h1 { "Page not found" }
                p { "The page you are looking for does not exist or has moved." }
                a href="/" { "Back to the home page" }
            }
        },
    )
}

/// Standalone: rendered when content (including the site chrome) is unavailable.
pub fn error_page() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Something went wrong" }
            }
            body {
                h1 { "Something went wrong" }
                p { "We could not load this page. Please try again shortly." }
            }
        }
    }
}
