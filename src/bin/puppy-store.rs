use clap::{Args, Parser, Subcommand, ValueEnum};
use failure::Error;
use log::{info, LevelFilter};
use puppy_store::{MapStore, Puppy, PuppyStorer, SledStore, SyncStore};
use std::env::current_dir;
use std::fmt;
use std::path::PathBuf;
use std::process::exit;

const DEFAULT_BACKEND: Backend = Backend::Sled;
const DEFAULT_DB_DIR: &str = "puppy-db";

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Backend {
    Map,
    Sync,
    Sled,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Backend::Map => "Map",
            Backend::Sync => "Sync",
            Backend::Sled => "Sled",
        };
        write!(f, "{}", s)
    }
}

#[derive(Parser, Debug)]
#[command(name = "puppy-store", version)]
struct Opt {
    /// Sets the storage backend
    #[arg(long, value_enum, value_name = "BACKEND")]
    backend: Option<Backend>,

    /// Sets the database directory of the sled backend
    #[arg(long, value_name = "DIR")]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, read, update and delete one puppy
    Demo,
    /// Store a new puppy and print its id
    Create(PuppyArgs),
    /// Print the puppy with the given id
    Read {
        /// a puppy id
        id: u32,
    },
    /// Replace the puppy with the given id
    Update {
        /// a puppy id
        id: u32,
        #[command(flatten)]
        puppy: PuppyArgs,
    },
    /// Delete the puppy with the given id
    Delete {
        /// a puppy id
        id: u32,
    },
}

#[derive(Args, Debug)]
struct PuppyArgs {
    /// breed of the puppy
    #[arg(long)]
    breed: String,
    /// colour of the puppy
    #[arg(long)]
    colour: String,
    /// value of the puppy, must not be negative
    #[arg(long, allow_negative_numbers = true)]
    value: f64,
}

impl From<PuppyArgs> for Puppy {
    fn from(args: PuppyArgs) -> Puppy {
        Puppy::new(args.breed, args.colour, args.value)
    }
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();
    if let Err(e) = run(opt) {
        eprintln!("Error: {}", e);
        for cause in e.iter_causes() {
            eprintln!("Caused by: {}", cause);
        }
        exit(1);
    }
}

fn run(opt: Opt) -> Result<(), Error> {
    let backend = opt.backend.unwrap_or(DEFAULT_BACKEND);
    info!("puppy-store {}", env!("CARGO_PKG_VERSION"));
    info!("Storage backend: {}", backend);

    match backend {
        Backend::Map => run_with_store(&MapStore::new(), backend, opt.command),
        Backend::Sync => run_with_store(&SyncStore::new(), backend, opt.command),
        Backend::Sled => {
            let path = match opt.path {
                Some(path) => path,
                None => current_dir()?.join(DEFAULT_DB_DIR),
            };
            info!("Database path: {}", path.display());
            let store = SledStore::new(sled::open(&path)?);
            let res = run_with_store(&store, backend, opt.command);
            store.close();
            res
        }
    }
}

fn run_with_store<S: PuppyStorer>(
    store: &S,
    backend: Backend,
    command: Command,
) -> Result<(), Error> {
    match command {
        Command::Demo => demo(store, backend)?,
        Command::Create(args) => {
            let id = store.create(args.into())?;
            println!("Created with ID: {}", id);
        }
        Command::Read { id } => {
            println!("{}", store.read(id)?);
        }
        Command::Update { id, puppy } => {
            store.update(id, puppy.into())?;
            println!("updated: {}", id);
        }
        Command::Delete { id } => {
            store.delete(id)?;
            println!("deleted: {}", id);
        }
    }
    Ok(())
}

// 跟着一只小狗走完 create / read / update / delete
fn demo<S: PuppyStorer>(store: &S, backend: Backend) -> puppy_store::Result<()> {
    let id = store.create(Puppy::new("Labrador", "Brown", 999.99))?;
    println!("{} Puppy Created with ID: {}", backend, id);
    println!("{} Puppy read: {}", backend, store.read(id)?);
    store.update(id, Puppy::new("Labrador", "Chocolate", 1499.99))?;
    println!("{} Puppy updated: {}", backend, id);
    store.delete(id)?;
    println!("{} Puppy deleted: {}", backend, store.read(id).is_err());
    Ok(())
}
