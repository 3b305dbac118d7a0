use argtree::{App, Arg, Arity, Command, Flag, Typecast};

fn main() {
    env_logger::init();

    let app = App::new("Serves and fetches files")
        .version(env!("CARGO_PKG_VERSION"))
        .global_flag(Flag::switch('v', "verbose", "Print what is going on"))
        .subcommand(
            Command::new("serve")
                .alias("s")
                .about("Serve a directory over HTTP")
                .flag(Flag::value('d', "dir", "Directory to serve"))
                .arg(Arg::new("port").required().doc("Port to bind").typecast(Typecast::int()))
                .action(|m| -> argtree::Result<()> {
                    let dir = m.value::<Option<String>>("dir")?.unwrap_or_else(|| ".".to_string());
                    println!("serving {dir} on port {}", m.value::<u16>("port")?);
                    Ok(())
                }),
        )
        .subcommand(
            Command::new("fetch")
                .about("Download files")
                .flag(Flag::switch('f', "force", "Overwrite existing files"))
                .arg(Arg::new("urls").arity(Arity::AtLeastOne).doc("What to download"))
                .action(|m| -> argtree::Result<()> {
                    for url in m.value::<Vec<String>>("urls")? {
                        let verb = if m.flag("force") { "refetching" } else { "fetching" };
                        println!("{verb} {url}");
                    }
                    Ok(())
                }),
        );

    if let Some(Err(err)) = app.run_env() {
        eprintln!("{err}");
        std::process::exit(1)
    }
}
