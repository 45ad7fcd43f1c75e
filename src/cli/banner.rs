//! Startup banner for interactive mode.

use std::io::IsTerminal;

struct Colors {
    accent: &'static str,
    title: &'static str,
    subtitle: &'static str,
    reset: &'static str,
}

const COLOR: Colors = Colors {
    accent: "\x1b[38;2;120;170;220m",
    title: "\x1b[1;38;2;220;200;120m",
    subtitle: "\x1b[38;2;110;110;130m",
    reset: "\x1b[0m",
};

const PLAIN: Colors = Colors {
    accent: "",
    title: "",
    subtitle: "",
    reset: "",
};

/// Prints the marketcast banner to stdout. Renders ANSI true-color when
/// stdout is a terminal, falls back to plain text otherwise.
pub fn print_banner() {
    let c = if std::io::stdout().is_terminal() { &COLOR } else { &PLAIN };
    let a = c.accent;
    let t = c.title;
    let s = c.subtitle;
    let r = c.reset;

    println!(
        r#"
{a}  ◇───◇{r}  {t}marketcast{r}
{a}  │ ? │{r}  {s}multi-model forecasting for prediction-market events{r}
{a}  ◇───◇{r}
"#
    );
}
