//! Breadcrumb trail rendering tests

use navtree::*;
use pretty_assertions::assert_eq;

fn blog_trail() -> Breadcrumbs {
    Breadcrumbs::new()
        .with(Breadcrumb::new("Home", "/"))
        .with(Breadcrumb::new("Blog", "/blog"))
}

#[test]
fn test_render_breadcrumbs() {
    let nav = Navigation::builder().build().unwrap();
    let html = nav
        .render_breadcrumbs(&blog_trail(), &mut Context::new(), &RenderOptions::new())
        .unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<ol class="breadcrumbs">"#,
            r#"<li class="crumb"><a href="/">Home</a></li>"#,
            r#"<li class="crumb last"><a href="/blog">Blog</a></li>"#,
            "</ol>"
        )
    );
}

#[test]
fn test_empty_trail_renders_nothing() {
    let nav = Navigation::builder().build().unwrap();
    let html = nav
        .render_breadcrumbs(&Breadcrumbs::new(), &mut Context::new(), &RenderOptions::new())
        .unwrap();
    assert_eq!(html, "");
}

#[test]
fn test_single_crumb_is_last() {
    let nav = Navigation::builder().build().unwrap();
    let trail = Breadcrumbs::new().with(Breadcrumb::new("Home", "/"));
    let html = nav
        .render_breadcrumbs(&trail, &mut Context::new(), &RenderOptions::new())
        .unwrap();
    assert_eq!(
        html,
        r#"<ol class="breadcrumbs"><li class="crumb last"><a href="/">Home</a></li></ol>"#
    );
}

#[test]
fn test_crumb_labels_expand_placeholders() {
    use serde_json::json;

    let nav = Navigation::builder().build().unwrap();
    let trail = Breadcrumbs::new()
        .with(Breadcrumb::new("{{ name }}", "/"))
        .with(Breadcrumb::new("{{ section }} & more", "/more"));
    let mut ctx = Context::new();
    ctx.define("name", json!("Home"));
    ctx.define("section", json!("<News>"));
    let html = nav
        .render_breadcrumbs(&trail, &mut ctx, &RenderOptions::new())
        .unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<ol class="breadcrumbs">"#,
            r#"<li class="crumb"><a href="/">Home</a></li>"#,
            r#"<li class="crumb last"><a href="/more">&lt;News&gt; &amp; more</a></li>"#,
            "</ol>"
        )
    );
}

#[test]
fn test_route_crumbs_use_render_params() {
    let nav = Navigation::builder()
        .routes(
            Routes::new()
                .with("index", "")
                .with("category", "blog/category/<slug:slug>"),
        )
        .build()
        .unwrap();
    let category = Breadcrumb::from_parts(
        "Rust",
        None,
        Some("category".to_string()),
        vec!["slug".to_string()],
    )
    .unwrap();
    let trail = Breadcrumbs::new()
        .with(Breadcrumb::route("Home", "index"))
        .with(category);

    let options = RenderOptions::new().param("slug", "rust");
    let html = nav
        .render_breadcrumbs(&trail, &mut Context::new(), &options)
        .unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<ol class="breadcrumbs">"#,
            r#"<li class="crumb"><a href="/">Home</a></li>"#,
            r#"<li class="crumb last"><a href="/blog/category/rust">Rust</a></li>"#,
            "</ol>"
        )
    );
}

#[test]
fn test_unresolvable_crumb_is_an_error() {
    let nav = Navigation::builder().build().unwrap();
    let trail = Breadcrumbs::new().with(Breadcrumb::route("Home", "index"));
    let err = nav
        .render_breadcrumbs(&trail, &mut Context::new(), &RenderOptions::new())
        .unwrap_err();
    assert!(matches!(err, NavError::Routing(RoutingError::UnknownRoute { .. })));
}

#[test]
fn test_render_crumb_defines_last() {
    let nav = Navigation::builder()
        .templates(HtmlTemplates::new().with_template(
            "navtree/crumb.html",
            |_, _, ctx| Ok(format!("{}", ctx.get("last").and_then(|v| v.as_bool()).unwrap_or(false))),
        ))
        .build()
        .unwrap();
    let mut ctx = Context::new();
    let crumb = Breadcrumb::new("Home", "/");
    let options = RenderOptions::new();
    assert_eq!(nav.render_crumb(&crumb, true, &mut ctx, &options).unwrap(), "true");
    assert_eq!(nav.render_crumb(&crumb, false, &mut ctx, &options).unwrap(), "false");
    assert!(!ctx.contains("last"));
}

#[test]
fn test_seo_title() {
    let trail = blog_trail().with(Breadcrumb::new("Rust", "/blog/category/rust"));
    assert_eq!(blog_trail().seo_title("Blog"), "Blog");
    assert_eq!(trail.seo_title("Rust"), "Rust | Blog");
}
