use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockroom_client::views::{HistoryView, RegistrationForm, SectorsView};
use stockroom_client::{HttpGateway, DEFAULT_API_URL};
use stockroom_core::inventory::{ItemCategory, Sector, Transaction, TransactionType};

#[derive(Parser, Debug)]
#[command(name = "stockroom", about = "Registro de entradas e saídas do almoxarifado")]
struct Cli {
    /// Base URL of the stockroom API.
    #[arg(long, env = "STOCKROOM_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage sectors.
    Sectors {
        #[command(subcommand)]
        command: SectorsCommand,
    },
    /// Register an incoming or outgoing movement.
    Register(RegisterArgs),
    /// Browse, edit and delete registered movements.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SectorsCommand {
    List,
    Add { name: String },
    Rename { id: String, name: String },
    Delete { id: String },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    kind: KindArg,
    /// Sector id; defaults to the first sector by name.
    #[arg(long)]
    sector: Option<String>,
    #[arg(long)]
    description: String,
    /// Defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = CategoryArg::Cargo)]
    category: CategoryArg,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i32,
    /// Four-digit asset tag, required for assets.
    #[arg(long, value_name = "NNNN")]
    asset_id: Option<String>,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    List {
        /// Matches the description (any case) or the asset tag.
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        sector: Option<String>,
        #[arg(long = "type", value_enum, value_name = "TYPE")]
        kind: Option<KindArg>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    Edit(EditArgs),
    Delete { id: String },
}

#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    kind: Option<KindArg>,
    #[arg(long)]
    sector: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,
    #[arg(long, allow_negative_numbers = true)]
    quantity: Option<i32>,
    #[arg(long, value_name = "NNNN")]
    asset_id: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    In,
    Out,
}

impl From<KindArg> for TransactionType {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::In => TransactionType::In,
            KindArg::Out => TransactionType::Out,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    Cargo,
    Asset,
}

impl From<CategoryArg> for ItemCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Cargo => ItemCategory::Cargo,
            CategoryArg::Asset => ItemCategory::Asset,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockroom_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let gateway = HttpGateway::new(cli.api_url);
    tracing::debug!(api_url = gateway.api_url(), "Using stockroom API");

    match cli.command {
        Command::Sectors { command } => run_sectors(gateway, command).await,
        Command::Register(args) => run_register(gateway, args).await,
        Command::History { command } => run_history(gateway, command).await,
    }
}

async fn run_sectors(gateway: HttpGateway, command: SectorsCommand) -> anyhow::Result<()> {
    let mut view = SectorsView::new(gateway);
    view.load().await;

    match command {
        SectorsCommand::List => {
            if let Some(error) = view.load_error() {
                bail!("Erro ao carregar setores: {error}");
            }
        }
        SectorsCommand::Add { name } => {
            let created = view.add(&name).await.context("Erro ao criar setor")?;
            println!("Setor criado: {} ({})", created.name, created.id);
        }
        SectorsCommand::Rename { id, name } => {
            let rewritten = view
                .rename(&id, &name)
                .await
                .context("Erro ao atualizar setor")?;
            println!("Setor atualizado; {rewritten} movimentação(ões) atualizada(s).");
        }
        SectorsCommand::Delete { id } => {
            let linked = view.delete(&id).await.context("Erro ao excluir setor")?;
            println!("Setor excluído; {linked} movimentação(ões) mantida(s) no histórico.");
        }
    }

    print_sectors(view.sectors());
    println!("Total: {}", view.total());
    Ok(())
}

async fn run_register(gateway: HttpGateway, args: RegisterArgs) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut form = RegistrationForm::new(gateway, today);
    form.load().await;
    if let Some(error) = form.load_error() {
        eprintln!("Aviso: setores indisponíveis ({error})");
    }

    form.transaction_type = args.kind.into();
    if let Some(sector) = args.sector {
        form.sector_id = Some(sector);
    }
    if let Some(date) = args.date {
        form.date = date;
    }
    form.description = args.description;
    form.category = args.category.into();
    form.quantity = args.quantity;
    if let Some(tag) = args.asset_id {
        form.set_asset_tag(&tag);
    }

    let saved = form.submit().await.context("Erro ao salvar")?;
    println!("Registro salvo com sucesso (id {}).", saved.id);
    print_transactions(&[&saved]);
    Ok(())
}

async fn run_history(gateway: HttpGateway, command: HistoryCommand) -> anyhow::Result<()> {
    let mut view = HistoryView::new(gateway);
    // Deleting by id needs no listing, so a history that fails to load can
    // still be cleaned up.
    if !matches!(command, HistoryCommand::Delete { .. }) {
        view.load().await;
        if let Some(error) = view.load_error() {
            bail!("Erro ao carregar histórico: {error}");
        }
    }

    match command {
        HistoryCommand::List {
            search,
            sector,
            kind,
            date,
        } => {
            view.filter.search = search;
            view.filter.sector_id = sector;
            view.filter.transaction_type = kind.map(Into::into);
            view.filter.date = date;

            let visible = view.visible();
            print_transactions(&visible);
            println!("Total: {}", visible.len());
        }
        HistoryCommand::Edit(args) => {
            view.begin_edit(&args.id)?;
            if let Some(sector) = &args.sector {
                view.choose_sector(sector);
            }
            if let Some(tag) = &args.asset_id {
                view.set_edit_asset_tag(tag);
            }
            if let Some(edit) = view.edit_mut() {
                if let Some(kind) = args.kind {
                    edit.transaction_type = kind.into();
                }
                if let Some(date) = args.date {
                    edit.date = date;
                }
                if let Some(description) = args.description {
                    edit.description = description;
                }
                if let Some(category) = args.category {
                    edit.category = category.into();
                }
                if let Some(quantity) = args.quantity {
                    edit.quantity = quantity;
                }
            }

            if let Some(saved) = view.save_edit().await.context("Erro ao atualizar movimentação")? {
                println!("Movimentação atualizada.");
                print_transactions(&[&saved]);
            }
        }
        HistoryCommand::Delete { id } => {
            view.delete(&id)
                .await
                .context("Erro ao excluir movimentação")?;
            println!("Movimentação {id} excluída.");
        }
    }
    Ok(())
}

fn print_sectors(sectors: &[Sector]) {
    println!("{:<8} NOME", "ID");
    for sector in sectors {
        println!("{:<8} {}", sector.id, sector.name);
    }
}

fn print_transactions(rows: &[&Transaction]) {
    println!(
        "{:<6} {:<10} {:<8} {:<20} {:<30} {:<10} {:>5} {:<6}",
        "ID", "DATA", "TIPO", "SETOR", "DESCRIÇÃO", "CATEGORIA", "QTD", "PLACA"
    );
    for tx in rows {
        println!(
            "{:<6} {:<10} {:<8} {:<20} {:<30} {:<10} {:>5} {:<6}",
            tx.id,
            tx.date.format("%d/%m/%Y").to_string(),
            tx.transaction_type.label(),
            tx.sector_name,
            tx.description,
            tx.category.label(),
            tx.quantity,
            tx.asset_id.as_deref().unwrap_or("-"),
        );
    }
}
