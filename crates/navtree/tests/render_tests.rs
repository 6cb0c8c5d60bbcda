//! Menu and node rendering tests

use navtree::html::{escape, View};
use navtree::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn nav() -> Navigation {
    Navigation::builder().build().unwrap()
}

fn user() -> RenderOptions {
    RenderOptions::new().viewer(User::new("user"))
}

fn leaf(id: &str) -> Node {
    Node::builder(id, id).url(id).build().unwrap()
}

fn parent_with_children() -> Node {
    Node::builder("test", "Test")
        .url("http://test.com")
        .children([leaf("c1"), leaf("c2"), leaf("c3")])
        .build()
        .unwrap()
}

/// Node template that appends the `foo` context value to the label.
fn foo_templates() -> HtmlTemplates {
    HtmlTemplates::new().with_template("test_app/test_node.html", |_, view, ctx| {
        let View::Node(node) = view else {
            return Ok(String::new());
        };
        Ok(format!(
            r#"<li class="{}"><a href="{}">{} {}</a></li>"#,
            node.classes().join(" "),
            escape(&node.url),
            escape(&node.label),
            escape(ctx.get_str("foo").unwrap_or("")),
        ))
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Nodes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_render_node() {
    let node = Node::builder("test", "Test").url("http://test.com").build().unwrap();
    let html = nav().render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(html, r#"<li class="menu-item"><a href="http://test.com">Test</a></li>"#);
}

#[test]
fn test_render_node_label_from_node_context() {
    let node = Node::builder("test", "{{ foo }}")
        .url("http://test.com")
        .context("foo", json!("bar"))
        .build()
        .unwrap();
    let html = nav().render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(html, r#"<li class="menu-item"><a href="http://test.com">bar</a></li>"#);
}

#[test]
fn test_render_node_label_from_caller_context() {
    let node = Node::builder("test", "{{ count }} new")
        .url("http://test.com")
        .build()
        .unwrap();
    let mut ctx: Context = [("count", json!(3))].into_iter().collect();
    let html = nav().render_node(&node, &mut ctx, &user()).unwrap();
    assert_eq!(html, r#"<li class="menu-item"><a href="http://test.com">3 new</a></li>"#);
}

#[test]
fn test_render_node_with_extra_context_template() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .template("test_app/test_node.html")
        .context("foo", json!("bar"))
        .build()
        .unwrap();
    let nav = Navigation::builder().templates(foo_templates()).build().unwrap();
    let html = nav.render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(html, r#"<li class="menu-item"><a href="http://test.com">Test bar</a></li>"#);
}

#[test]
fn test_render_node_current_from_context() {
    let node = Node::builder("test", "Test").url("http://test.com").build().unwrap();
    let mut ctx: Context = [("current_menu_item", json!("test"))].into_iter().collect();
    let html = nav().render_node(&node, &mut ctx, &user()).unwrap();
    assert_eq!(
        html,
        r#"<li class="menu-item current"><a href="http://test.com">Test</a></li>"#
    );
}

#[test]
fn test_render_node_link_attrs() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .link_attr("target", "_blank")
        .link_attr("title", "Click me !")
        .build()
        .unwrap();
    let html = nav().render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(
        html,
        r#"<li class="menu-item"><a href="http://test.com" target="_blank" title="Click me !">Test</a></li>"#
    );
}

#[test]
fn test_render_node_attrs_and_css_class() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .attr("id", "important")
        .css_class("highlight")
        .title("Go & see")
        .build()
        .unwrap();
    let html = nav().render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(
        html,
        r#"<li class="menu-item highlight" id="important"><a href="http://test.com" title="Go &amp; see">Test</a></li>"#
    );
}

#[test]
fn test_render_node_with_children() {
    let html = nav()
        .render_node(&parent_with_children(), &mut Context::new(), &user())
        .unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<li class="menu-item has-children has-dropdown">"#,
            r#"<a href="http://test.com">Test</a>"#,
            r#"<ul class="sub-menu dropdown">"#,
            r#"<li class="menu-item"><a href="c1">c1</a></li>"#,
            r#"<li class="menu-item"><a href="c2">c2</a></li>"#,
            r#"<li class="menu-item"><a href="c3">c3</a></li>"#,
            "</ul></li>"
        )
    );
}

#[test]
fn test_render_node_with_children_and_current() {
    let html = nav()
        .render_node(&parent_with_children(), &mut Context::new(), &user().current("test:c3"))
        .unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<li class="menu-item has-children has-current has-dropdown">"#,
            r#"<a href="http://test.com">Test</a>"#,
            r#"<ul class="sub-menu dropdown">"#,
            r#"<li class="menu-item"><a href="c1">c1</a></li>"#,
            r#"<li class="menu-item"><a href="c2">c2</a></li>"#,
            r#"<li class="menu-item current"><a href="c3">c3</a></li>"#,
            "</ul></li>"
        )
    );
}

#[test]
fn test_has_current_is_not_recursive() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .child(
            Node::builder("c1", "c1")
                .url("c1")
                .child(leaf("s1"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let html = nav()
        .render_node(&node, &mut Context::new(), &user().current("test:c1:s1"))
        .unwrap();
    assert!(html.starts_with(r#"<li class="menu-item has-children has-dropdown">"#));
    assert!(html.contains(r#"<li class="menu-item has-children has-current has-dropdown"><a href="c1">"#));
    assert!(html.contains(r#"<li class="menu-item current"><a href="s1">s1</a></li>"#));
}

#[test]
fn test_render_node_with_children_and_depth() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .children([
            Node::builder("c1", "c1")
                .url("c1")
                .child(leaf("s1"))
                .build()
                .unwrap(),
            leaf("c2"),
            leaf("c3"),
        ])
        .build()
        .unwrap();

    let html = nav()
        .render_node(&node, &mut Context::new(), &user().max_depth(1))
        .unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<li class="menu-item has-children has-dropdown">"#,
            r#"<a href="http://test.com">Test</a>"#,
            r#"<ul class="sub-menu dropdown">"#,
            r#"<li class="menu-item"><a href="c1">c1</a></li>"#,
            r#"<li class="menu-item"><a href="c2">c2</a></li>"#,
            r#"<li class="menu-item"><a href="c3">c3</a></li>"#,
            "</ul></li>"
        )
    );

    let html = nav()
        .render_node(&node, &mut Context::new(), &user().max_depth(0))
        .unwrap();
    assert_eq!(html, r#"<li class="menu-item"><a href="http://test.com">Test</a></li>"#);
}

#[test]
fn test_depth_is_relative_to_start() {
    let root = Node::builder("test", "Test")
        .url("http://test.com")
        .child(
            Node::builder("c1", "c1")
                .url("c1")
                .child(leaf("s1"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let children = root.children();
    let c1 = &children[0];

    let html = nav()
        .render_node(c1, &mut Context::new(), &user().max_depth(1))
        .unwrap();
    assert!(html.contains(r#"<a href="s1">s1</a>"#));
}

#[test]
fn test_hidden_children_are_skipped() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .children([
            Node::builder("admin", "Admin")
                .url("/admin")
                .visibility(Visibility::Staff)
                .build()
                .unwrap(),
        ])
        .build()
        .unwrap();
    let html = nav().render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(html, r#"<li class="menu-item"><a href="http://test.com">Test</a></li>"#);
}

#[test]
fn test_hidden_node_renders_nothing() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .visibility(Visibility::Anonymous)
        .build()
        .unwrap();
    let html = nav().render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(html, "");
}

#[test]
fn test_route_node_uses_render_params() {
    let node = Node::builder("category", "Category")
        .route("category")
        .reverse_kwargs(["slug"])
        .build()
        .unwrap();
    let nav = Navigation::builder()
        .routes(Routes::new().with("category", "blog/category/<slug:slug>"))
        .build()
        .unwrap();
    let html = nav
        .render_node(&node, &mut Context::new(), &user().param("slug", "rust"))
        .unwrap();
    assert_eq!(
        html,
        r#"<li class="menu-item"><a href="/blog/category/rust">Category</a></li>"#
    );
}

#[test]
fn test_dynamic_children_render() {
    let node = Node::builder("test", "Test")
        .url("http://test.com")
        .dynamic_children(|| (0..2).map(|i| leaf(&i.to_string())).collect())
        .build()
        .unwrap();
    let html = nav()
        .render_node(&node, &mut Context::new(), &user().current("1"))
        .unwrap();
    assert!(html.starts_with(r#"<li class="menu-item has-children has-current has-dropdown">"#));
    assert!(html.contains(r#"<li class="menu-item current"><a href="1">1</a></li>"#));
}

#[test]
fn test_label_is_escaped() {
    let node = Node::builder("test", "<b>Bold</b>").url("/?a=1&b=2").build().unwrap();
    let html = nav().render_node(&node, &mut Context::new(), &user()).unwrap();
    assert_eq!(
        html,
        r#"<li class="menu-item"><a href="/?a=1&amp;b=2">&lt;b&gt;Bold&lt;/b&gt;</a></li>"#
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Menus
// ═══════════════════════════════════════════════════════════════════════

fn main_menu() -> Menu {
    let mut menu = Menu::new("main");
    menu.register(Node::builder("test", "Test").url("http://test.com").build().unwrap());
    menu
}

#[test]
fn test_render_menu() {
    let nav = Navigation::builder().menu(main_menu()).build().unwrap();
    let html = nav
        .render_menu_named("main", &mut Context::new(), &user())
        .unwrap();
    assert_eq!(
        html,
        r#"<ul class="main-menu"><li class="menu-item"><a href="http://test.com">Test</a></li></ul>"#
    );
}

#[test]
fn test_caller_context_available_in_node_template() {
    let mut menu = Menu::new("main");
    menu.register(
        Node::builder("context", "Context")
            .url("http://test-context.com")
            .template("test_app/test_node.html")
            .build()
            .unwrap(),
    );
    let nav = Navigation::builder()
        .menu(menu)
        .templates(foo_templates())
        .build()
        .unwrap();

    let mut ctx: Context = [("foo", json!("bar"))].into_iter().collect();
    let html = nav.render_menu_named("main", &mut ctx, &user()).unwrap();
    assert_eq!(
        html,
        r#"<ul class="main-menu"><li class="menu-item"><a href="http://test-context.com">Context bar</a></li></ul>"#
    );
}

#[test]
fn test_menu_context_reaches_nodes() {
    let mut menu = Menu::new("main").with_context("foo", json!("menu"));
    menu.register(
        Node::builder("n", "N")
            .url("/n")
            .template("test_app/test_node.html")
            .build()
            .unwrap(),
    );
    let nav = Navigation::builder()
        .menu(menu)
        .templates(foo_templates())
        .build()
        .unwrap();
    let html = nav
        .render_menu_named("main", &mut Context::new(), &user())
        .unwrap();
    assert!(html.contains(">N menu</a>"));
}

#[test]
fn test_menu_with_no_visible_nodes_is_empty() {
    let mut menu = Menu::new("main");
    menu.register(
        Node::builder("admin", "Admin")
            .url("/admin")
            .visibility(Visibility::Staff)
            .build()
            .unwrap(),
    );
    let nav = Navigation::builder().menu(menu).build().unwrap();
    let html = nav
        .render_menu_named("main", &mut Context::new(), &user())
        .unwrap();
    assert_eq!(html, "");

    let staff = RenderOptions::new().viewer(User::new("staff").staff());
    let html = nav
        .render_menu_named("main", &mut Context::new(), &staff)
        .unwrap();
    assert!(html.contains("Admin"));
}

#[test]
fn test_viewer_from_context() {
    let nav = Navigation::builder().menu(main_menu()).build().unwrap();
    let mut ctx = Context::for_viewer(AnonymousUser);
    let html = nav
        .render_menu_named("main", &mut ctx, &RenderOptions::new())
        .unwrap();
    assert!(html.starts_with(r#"<ul class="main-menu">"#));
}

#[test]
fn test_missing_viewer_is_an_error() {
    let nav = Navigation::builder().menu(main_menu()).build().unwrap();
    let err = nav
        .render_menu_named("main", &mut Context::new(), &RenderOptions::new())
        .unwrap_err();
    assert!(matches!(err, NavError::MissingViewer { tag: "render_menu" }));

    let node = leaf("x");
    let err = nav
        .render_node(&node, &mut Context::new(), &RenderOptions::new())
        .unwrap_err();
    assert!(matches!(err, NavError::MissingViewer { tag: "render_node" }));
}

#[test]
fn test_unknown_menu_is_an_error() {
    let err = nav()
        .render_menu_named("footer", &mut Context::new(), &user())
        .unwrap_err();
    assert!(matches!(err, NavError::MenuNotFound { name } if name == "footer"));
}

#[test]
fn test_custom_current_classes() {
    let config = MenuConfig::from_json(
        r#"{"CURRENT_MENU_ITEM_CLASS": "active", "CURRENT_MENU_ITEM_PARENT_CLASS": "open"}"#,
    )
    .unwrap();
    let nav = Navigation::builder().config(config).build().unwrap();
    let html = nav
        .render_node(&parent_with_children(), &mut Context::new(), &user().current("test:c2"))
        .unwrap();
    assert!(html.starts_with(r#"<li class="menu-item has-children open has-dropdown">"#));
    assert!(html.contains(r#"<li class="menu-item active"><a href="c2">c2</a></li>"#));
}

#[test]
fn test_render_discards_frames_left_by_template() {
    let templates = HtmlTemplates::new().with_template("navtree/node.html", |_, _, ctx| {
        ctx.update([("leak", json!(true))]);
        ctx.push_frame();
        Ok(String::from("<li></li>"))
    });
    let nav = Navigation::builder().templates(templates).build().unwrap();
    let mut ctx: Context = [("title", json!("Home"))].into_iter().collect();
    let html = nav.render_node(&leaf("x"), &mut ctx, &user()).unwrap();
    assert_eq!(html, "<li></li>");
    assert_eq!(ctx.depth(), 1);
    assert_eq!(ctx.len(), 1);
    assert!(!ctx.contains("leak"));
}

#[test]
fn test_menu_config_is_in_template_context() {
    let config = MenuConfig::from_json(r#"{"CURRENT_MENU_ITEM_CLASS": "active"}"#).unwrap();
    let templates = HtmlTemplates::new().with_template("navtree/node.html", |_, _, ctx| {
        Ok(ctx
            .get("menu_config")
            .map(|config| config.to_string())
            .unwrap_or_default())
    });
    let nav = Navigation::builder()
        .config(config)
        .templates(templates)
        .build()
        .unwrap();
    let mut ctx = Context::new();
    let html = nav.render_node(&leaf("x"), &mut ctx, &user()).unwrap();
    assert_eq!(
        html,
        r#"{"CURRENT_MENU_ITEM_CLASS":"active","CURRENT_MENU_ITEM_PARENT_CLASS":"has-current"}"#
    );
    assert!(!ctx.contains("menu_config"));
}

#[test]
fn test_render_leaves_caller_context_unchanged() {
    let nav = Navigation::builder().menu(main_menu()).build().unwrap();
    let mut ctx: Context = [("foo", json!("bar"))].into_iter().collect();
    let before = ctx.flatten();

    nav.render_menu_named("main", &mut ctx, &user().current("test"))
        .unwrap();
    assert_eq!(ctx.depth(), 1);
    assert_eq!(ctx.flatten(), before);
}

#[test]
fn test_nested_menu_template_sees_menu_keys() {
    let templates = HtmlTemplates::new().with_template("navtree/node.html", |_, _, ctx| {
        Ok(format!(
            "[{}:{}]",
            ctx.get_str("menu_id").unwrap_or("?"),
            ctx.get_str("node_id").unwrap_or("?")
        ))
    });
    let nav = Navigation::builder()
        .menu(main_menu())
        .templates(templates)
        .build()
        .unwrap();
    let html = nav
        .render_menu_named("main", &mut Context::new(), &user())
        .unwrap();
    assert_eq!(html, r#"<ul class="main-menu">[main:test]</ul>"#);
}
