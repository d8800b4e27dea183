mod logging;

use clap::Parser;
use ntm::{
    analyze_strict, summary_table_with_comments, Machine, MachineLoader, MachineManager,
    RunResult, Simulator, TraceWriter, DEFAULT_MAX_DEPTH,
};
use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Runs a nondeterministic Turing machine breadth-first over one or more inputs.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  ntm-cli --program machines/a_plus.csv -i '' -i a -i aaa
  ntm-cli --machine 'a plus' -i a -c 'shortest accepted' -i b -c 'wrong symbol'
  ntm-cli --machine 'contains aa' -i abaab --max-depth 10
  cat machines/runaway.csv | ntm-cli -i a --json")]
struct Cli {
    /// Machine description file (.csv). A description can also be piped via stdin.
    #[clap(short, long, conflicts_with = "machine")]
    program: Option<PathBuf>,

    /// Name of a built-in machine
    #[clap(short, long)]
    machine: Option<String>,

    /// Input string to simulate; repeat for several runs
    #[clap(short, long, required_unless_present = "list")]
    input: Vec<String>,

    /// Comment for the summary table row of the matching --input; repeat in input order
    #[clap(short, long)]
    comment: Vec<String>,

    /// Number of levels to explore before giving up
    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Also append the trace to this file
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Write the summary table to this file
    #[clap(short, long)]
    table: Option<PathBuf>,

    /// Print one JSON result per input instead of the trace
    #[clap(long)]
    json: bool,

    /// Treat analyzer warnings as errors
    #[clap(long)]
    strict: bool,

    /// List the built-in machines and exit
    #[clap(short, long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    let cli = Cli::parse();

    if cli.list {
        list_machines()?;
        return Ok(());
    }

    let machine = load_machine(&cli)?;
    info!(
        machine = machine.name(),
        states = machine.state_count(),
        transitions = machine.transition_count(),
        "loaded machine"
    );
    if cli.strict {
        analyze_strict(&machine)?;
    }

    let results = run_inputs(&cli, &machine)?;

    let title = format!("Summary Table (Machine: {}):", machine.name());
    let table = summary_table_with_comments(&results, &cli.comment);

    if !cli.json {
        println!("\n{}\n{}", title, table);
    }
    if let Some(path) = &cli.table {
        fs::write(path, format!("{}\n{}", title, table))?;
    }

    Ok(())
}

/// Loads the machine from a file, a built-in name, or stdin, in that order.
fn load_machine(cli: &Cli) -> Result<Machine, Box<dyn Error>> {
    if let Some(path) = &cli.program {
        Ok(MachineLoader::load_machine(path)?)
    } else if let Some(name) = &cli.machine {
        Ok(MachineManager::get_machine_by_name(name)?)
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(MachineLoader::load_machine_from_string(&buffer)?)
    } else {
        Err("No machine given: use --program, --machine, or pipe a description on stdin".into())
    }
}

fn run_inputs(cli: &Cli, machine: &Machine) -> Result<Vec<RunResult>, Box<dyn Error>> {
    let simulator = Simulator::new(machine);
    let mut output = match &cli.output {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    let mut results = Vec::with_capacity(cli.input.len());
    for input in &cli.input {
        debug!(input = input.as_str(), max_depth = cli.max_depth, "running input");
        let result = if cli.json {
            let result = simulator.run(input, cli.max_depth);
            println!("{}", serde_json::to_string(&result)?);
            result
        } else {
            let tee = Tee {
                primary: io::stdout().lock(),
                secondary: output.as_mut(),
            };
            let mut writer = TraceWriter::new(tee);
            let result = simulator.run_with_observer(input, cli.max_depth, &mut writer);
            writer.finish()?;
            result
        };
        results.push(result);
    }

    Ok(results)
}

fn list_machines() -> Result<(), Box<dyn Error>> {
    for index in 0..MachineManager::get_machine_count() {
        let info = MachineManager::get_machine_info(index)?;
        println!(
            "{:<16} start: {:<6} accept: {:<6} states: {:<3} transitions: {}",
            info.name, info.start_state, info.accept_state, info.state_count, info.transition_count
        );
    }
    Ok(())
}

/// Writes everything to `primary` and, when present, to `secondary`.
struct Tee<'a, W: Write> {
    primary: W,
    secondary: Option<&'a mut File>,
}

impl<W: Write> Write for Tee<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        if let Some(file) = self.secondary.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        if let Some(file) = self.secondary.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}
