use super::colors::Colors;

#[test]
fn off_palette_is_plain() {
    let colors = Colors::new(false);

    assert!(!colors.is_enabled());
    assert_eq!(colors, Colors::default());
    assert_eq!(colors.paint(colors.dim, "/0/1"), "/0/1");
}

#[test]
fn dim_combines_with_colors() {
    let colors = Colors::new(true);

    assert!(colors.is_enabled());
    let dimmed = colors.paint(colors.dim, &colors.paint(colors.blue, "a"));
    assert_eq!(dimmed, "\x1b[2m\x1b[34ma\x1b[0m\x1b[0m");
}
