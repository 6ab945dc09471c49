//! Demo binary for the switchboard library.
//!
//! Registers a handful of commands covering the usage-string grammar (typed
//! arguments, defaults, zero-argument commands) and runs the process
//! arguments through the app.

use switchboard_core::App;

fn main() {
    init_tracing();

    let mut app = App::new();

    app.command("hello <name:string>", |args| {
        println!("hello {}", args[0].as_str().unwrap_or_default());
    });

    app.command("goodbye <name:string=person>", |args| {
        println!("goodbye {}", args[0].as_str().unwrap_or_default());
    });

    app.command("ping", |_args| {
        println!("pong");
    });

    app.command("count <from:int> <to:int> <double:bool=false>", |args| {
        let from = args[0].as_i64().unwrap_or(0);
        let to = args[1].as_i64().unwrap_or(0);
        let multiplier = if args[2].as_bool().unwrap_or(false) { 2 } else { 1 };
        for i in from..=to {
            println!("{}", i * multiplier);
        }
    });

    let argv: Vec<String> = std::env::args().collect();
    app.run(&argv);
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("switchboard_core=info")
        .init();
}
