use galaxy::Galaxy;

fn main() {
    env_logger::init();

    if let Err(e) = Galaxy::new().run() {
        eprintln!("galaxy: {}", e);
        std::process::exit(1);
    }
}
