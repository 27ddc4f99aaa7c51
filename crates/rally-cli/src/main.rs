use rally_core::locate::LocateResult;
use rally_core::session::{FloorSession, SessionPhase};
use rally_core::Riser;
use rally_store::{BuildingRepository, StoreConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let task = args.get(1).map(|s| s.as_str()).unwrap_or("");

    let result = match task {
        "list" => list().await,
        "show" => show(&args[2..]).await,
        "locate" => locate_floor(&args[2..]).await,
        _ => {
            eprintln!("Usage: rally <list | show <building-id> | locate <building-id> <floor> [riser-label]>");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("rally: {e}");
        std::process::exit(1);
    }
}

fn open_store() -> Result<Box<dyn BuildingRepository + Send + Sync>, String> {
    StoreConfig::from_env().open().map_err(|e| e.to_string())
}

async fn list() -> Result<(), String> {
    let store = open_store()?;
    let buildings = store.list().await.map_err(|e| e.to_string())?;
    if buildings.is_empty() {
        println!("No buildings.");
        return Ok(());
    }
    for b in buildings {
        println!(
            "{:>4}  {}  ({} floors, {} risers)",
            b.id,
            b.name,
            b.floors.len(),
            b.risers.len()
        );
    }
    Ok(())
}

async fn show(args: &[String]) -> Result<(), String> {
    let Some(id) = args.first() else {
        return Err("usage: rally show <building-id>".to_string());
    };
    let id: i64 = id.parse().map_err(|_| format!("invalid building id: {id}"))?;
    let store = open_store()?;
    let building = store.get(id).await.map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&building).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

async fn locate_floor(args: &[String]) -> Result<(), String> {
    let (Some(id), Some(floor)) = (args.first(), args.get(1)) else {
        return Err("usage: rally locate <building-id> <floor> [riser-label]".to_string());
    };
    let id: i64 = id.parse().map_err(|_| format!("invalid building id: {id}"))?;
    let floor: i32 = floor.parse().map_err(|_| format!("invalid floor: {floor}"))?;

    let store = open_store()?;
    let building = store.get(id).await.map_err(|e| e.to_string())?;

    let mut session = FloorSession::new(building.risers.clone());
    let info = session.select_floor(floor).clone();

    match session.phase() {
        SessionPhase::RiserSelected => {
            println!("Riser on floor {floor}:");
            if let Some(riser) = session.selected_riser() {
                print_riser(riser);
            }
        }
        SessionPhase::AwaitingRiserChoice => {
            if let Some(label) = args.get(2) {
                let chosen = session
                    .risers_on_floor()
                    .iter()
                    .find(|r| r.number.eq_ignore_ascii_case(label))
                    .map(|r| r.id);
                let Some(riser_id) = chosen else {
                    return Err(format!("no riser named '{label}' on floor {floor}"));
                };
                session.choose_riser(riser_id).map_err(|e| e.to_string())?;
                println!("Selected riser on floor {floor}:");
                if let Some(riser) = session.selected_riser() {
                    print_riser(riser);
                }
            } else {
                println!("Multiple risers on floor {floor}; rerun with a riser label:");
                for riser in session.risers_on_floor() {
                    print_riser(riser);
                }
            }
        }
        SessionPhase::FloorSelected => {
            println!("No riser on floor {floor}.");
            print_neighbors(&info);
        }
        SessionPhase::Idle => {}
    }
    Ok(())
}

fn print_neighbors(info: &LocateResult) {
    match &info.above {
        Some(p) => {
            println!(
                "Nearest riser above: {} ({} floor{} up)",
                p.riser.number,
                p.distance,
                if p.distance == 1 { "" } else { "s" }
            );
            print_riser(&p.riser);
        }
        None => println!("No riser above."),
    }
    match &info.below {
        Some(p) => {
            println!(
                "Nearest riser below: {} ({} floor{} down)",
                p.riser.number,
                p.distance,
                if p.distance == 1 { "" } else { "s" }
            );
            print_riser(&p.riser);
        }
        None => println!("No riser below."),
    }
}

fn print_riser(riser: &Riser) {
    println!(
        "  {}  floors: {}  location: {}",
        riser.number,
        if riser.floors_covered.is_empty() {
            "N/A"
        } else {
            riser.floors_covered.as_str()
        },
        if riser.location_description.is_empty() {
            "N/A"
        } else {
            riser.location_description.as_str()
        }
    );
}
