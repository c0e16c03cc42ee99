use std::path::Path;

use console::Style;
use vsview_core::frame::NodeInfo;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_info_summary(source: &Path, chain: &Path, node: &NodeInfo) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Output node"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.path.apply_to(source.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Chain"),
        s.path.apply_to(chain.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", node.width, node.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Format"),
        s.value.apply_to(&node.format)
    );
    match node.frame_count {
        Some(n) => println!("  {:<14}{}", s.label.apply_to("Frames"), s.value.apply_to(n)),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Frames"),
            s.warn.apply_to("unknown")
        ),
    }
    println!();
}
