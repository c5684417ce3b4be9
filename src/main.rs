fn main() {
    if let Err(err) = treeline_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
