use draft_chess::cli::cli_top::run_stdio_loop;

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    run_stdio_loop()
}
