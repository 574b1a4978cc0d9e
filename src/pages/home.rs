use axum::response::Html;

use super::Viewer;
use super::layout;

pub async fn index(viewer: Viewer) -> Html<String> {
    layout::page(
        "Home page",
        viewer.email(),
        r#"<div class="text-center">
    <h1 class="display-4">Welcome</h1>
    <p>Look up any public GitHub account on the <a href="/GithubProfile">GitHub Profile</a> page.</p>
</div>"#,
    )
}

pub async fn about(viewer: Viewer) -> Html<String> {
    layout::page(
        "About",
        viewer.email(),
        r#"<h1>About</h1>
<h3>Your application description page.</h3>
<p>A small server-rendered application that fetches public GitHub profiles.</p>"#,
    )
}

pub async fn contact(viewer: Viewer) -> Html<String> {
    layout::page(
        "Contact",
        viewer.email(),
        r#"<h1>Contact</h1>
<h3>Your contact page.</h3>
<address>
    One Microsoft Way<br />
    Redmond, WA 98052-6399<br />
    <abbr title="Phone">P:</abbr> 425.555.0100
</address>
<address>
    <strong>Support:</strong> <a href="mailto:Support@example.com">Support@example.com</a><br />
    <strong>Marketing:</strong> <a href="mailto:Marketing@example.com">Marketing@example.com</a>
</address>"#,
    )
}

pub async fn privacy(viewer: Viewer) -> Html<String> {
    layout::page(
        "Privacy Policy",
        viewer.email(),
        r#"<h1>Privacy Policy</h1>
<p>Profiles fetched from GitHub are shown once and never stored.
Account e-mail addresses and password hashes are kept only to sign you in.</p>"#,
    )
}
