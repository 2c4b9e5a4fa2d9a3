//! Minimal server-rendered HTML for the public site and the admin pages.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::auth::SessionUser;
use crate::models::{ContentDocument, Language, SiteContent, User};

/// JSON embedded in a `<script>` element must not close it early.
fn script_json(value: &impl serde::Serialize) -> PreEscaped<String> {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    PreEscaped(json.replace("</", "<\\/"))
}

fn layout(lang: &str, title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body { (body) }
        }
    }
    .into_string()
}

/// The public home page in `language`.
pub fn home(content: &SiteContent, language: Language) -> String {
    let doc: &ContentDocument = content.for_language(language);
    let c = &doc.sections;
    let form = &c.contact.form;

    let other = match language {
        Language::En => Language::Fr,
        Language::Fr => Language::En,
    };

    let body = html! {
        nav {
            a href="#about" { (c.nav.about) }
            a href="#initiatives" { (c.nav.initiatives) }
            a href="#contact" { (c.nav.contact) }
            a.donate href="#contact" { (c.nav.donate) }
            a.lang-switch href={ "/?lang=" (other.as_str()) } { (other.as_str().to_uppercase()) }
        }
        header.hero {
            h1 { (c.hero.title1) br; (c.hero.title2) }
            p { (c.hero.description) }
            a href="#about" { (c.hero.learn_more) }
            a href="#contact" { (c.hero.get_involved) }
        }
        section id="about" {
            h2 { (c.about.title) }
            p { (c.about.paragraph1) }
            p { (c.about.paragraph2) }
        }
        section id="initiatives" {
            h2 { (c.initiatives.title) }
            p { (c.initiatives.subtitle) }
            @for card in &c.initiatives.cards {
                article.card {
                    h3 { (card.title) }
                    p { (card.description) }
                }
            }
        }
        section id="contact" {
            h2 { (c.contact.title) }
            p { (c.contact.description) }
            // `<br>` is the only markup the address keeps.
            address {
                @for (i, line) in c.contact.address.split("<br>").enumerate() {
                    @if i > 0 { br; }
                    (line)
                }
            }
            a href={ "mailto:" (c.contact.email) } { (c.contact.email) }
            form id="contact-form" data-success=(form.success) {
                label { (form.name) input name="name" required; }
                label { (form.email) input name="email" type="email" required; }
                label { (form.subject) input name="subject"; }
                label { (form.message) textarea name="message" required {} }
                button type="submit" { (form.submit) }
            }
        }
        footer { (c.footer.copyright) }
    };

    layout(language.as_str(), "Amplify", body)
}

/// The admin login page, optionally showing an error.
pub fn login(error: Option<&str>) -> String {
    let body = html! {
        main.login {
            h1 { "Admin Login" }
            @if let Some(error) = error {
                p.error { (error) }
            }
            form method="post" action="/admin/login" {
                label { "Username" input name="username" autocomplete="username" required; }
                label {
                    "Password"
                    input name="password" type="password" autocomplete="current-password" required;
                }
                button type="submit" { "Log in" }
            }
        }
    };
    layout("en", "Admin Login", body)
}

fn admin_header(user: &SessionUser) -> Markup {
    html! {
        header {
            span.who { (user.username) " (" (user.role.as_str()) ")" }
            a href="/admin" { "Content" }
            @if user.role.is_admin() {
                a href="/admin/users" { "Users" }
            }
            a href="/admin/logout" { "Log out" }
        }
    }
}

/// The content editing panel. The editing client reads the embedded JSON.
pub fn admin_panel(content: &SiteContent, user: &SessionUser) -> String {
    let body = html! {
        (admin_header(user))
        main {
            h1 { "Content" }
            p { "Last updated: en " (content.en.updated_at) " / fr " (content.fr.updated_at) }
            script id="content-data" type="application/json" { (script_json(content)) }
        }
    };
    layout("en", "Admin Panel", body)
}

/// The user management page.
pub fn users_page(users: &[User], user: &SessionUser) -> String {
    let body = html! {
        (admin_header(user))
        main {
            h1 { "Users" }
            table {
                thead {
                    tr { th { "Username" } th { "Role" } th { "Created" } }
                }
                tbody {
                    @for u in users {
                        tr data-id=(u.id) {
                            td { (u.username) }
                            td { (u.role.as_str()) }
                            td { (u.created_at) }
                        }
                    }
                }
            }
        }
    };
    layout("en", "User Management", body)
}

/// A bare error page.
pub fn error_page(message: &str) -> String {
    layout("en", "Error", html! { main { h1 { (message) } } })
}
