use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::io::{self, Write};
use subnet_partition::cli::{Args, Command, Format};
use subnet_partition::config::EmitConfig;
use subnet_partition::output::{
    emit_all, write_network_info, CidrSink, DhcpdDirSink, JsonSink, RecordSink, TableSink,
    TableStyle,
};
use subnet_partition::{calculate, plan};

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    let args = Args::parse();
    if let Err(e) = log4rs::init_file(&args.log_config, Default::default()) {
        eprintln!(
            "{} initializing log4rs from {}: {e}",
            "WARN".on_yellow(),
            args.log_config.display()
        );
    }
    log::info!("#Start main()");

    if let Err(e) = run(args) {
        log::error!("{e}");
        eprintln!("{} {e}", "ERROR".on_red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    match args.command {
        Command::Calc { address, mask } => {
            let info = calculate(&address, &mask)?;
            let mut out = stdout.lock();
            write_network_info(&mut out, &info)?;
            out.flush()?;
        }
        Command::Split {
            address,
            mask,
            count,
            format,
            dhcpd,
        } => {
            let plan = plan(&address, &mask, count)?;
            log::info!("{} -> {} x /{}", plan.base, plan.requested, plan.new_prefix);

            let out = stdout.lock();
            let mut sink: Box<dyn RecordSink> = match format {
                Format::Table => Box::new(TableSink::new(out, TableStyle::Quoted)),
                Format::Csv => Box::new(TableSink::new(out, TableStyle::Csv)),
                Format::Json => Box::new(JsonSink::new(out)),
                Format::Cidr => Box::new(CidrSink::new(out)),
            };
            emit_all(plan.records(), sink.as_mut())?;

            if dhcpd.enabled() {
                let mut config = EmitConfig::from_env()?;
                config.apply_args(&dhcpd)?;
                emit_all(plan.records(), &mut DhcpdDirSink::new(config))?;
            }
        }
    }
    Ok(())
}
