fn main() {
    std::process::exit(vips_version::app::startup::startup());
}
