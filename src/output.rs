use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if atty::is(atty::Stream::Stderr) {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if atty::is(atty::Stream::Stderr) {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

/// One-line summary of a `--once` iteration, suitable for scripts.
pub fn print_summary(files: usize, bytes: u64, dirs: usize, failed: usize) {
    let line = format!("moved {files} file(s), {bytes} byte(s); removed {dirs} dir(s); {failed} failed");
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), line);
    } else {
        println!("ok: {line}");
    }
}
