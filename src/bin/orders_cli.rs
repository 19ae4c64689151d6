use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use orders_client::{
    config::{self, ClientConfig},
    models::{ItemForm, OrderForm},
    render, ItemController, OrderController, OrdersApi,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let api = OrdersApi::new(cfg.base_url.clone()).context("failed to build HTTP client")?;
    let state_path = form_state_path(&cfg);
    let mut state = load_state(&state_path)?;

    match cli.command {
        Commands::Order(command) => {
            handle_order_command(api, &mut state, command, cli.json, cli.html).await?
        }
        Commands::Item(command) => {
            handle_item_command(api, &mut state, command, cli.json, cli.html).await?
        }
    }

    save_state(&state_path, &mut state)?;
    Ok(())
}

#[derive(Parser)]
#[command(name = "orders-cli", about = "Console front end for the Orders REST API", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render the form and records as pretty JSON"
    )]
    json: bool,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render search results as the HTML results table"
    )]
    html: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Order(OrderCommands),
    #[command(subcommand)]
    Item(ItemCommands),
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Create an order from the form (plus any flags given here)
    Create(OrderFieldArgs),
    /// Update the order named by the form's id
    Update(OrderFieldArgs),
    /// Fetch one order into the form
    Retrieve(OrderIdArg),
    /// Delete the order named by the form's id
    Delete(OrderIdArg),
    /// Cancel the order named by the form's id
    Cancel(OrderIdArg),
    /// Blank the whole order form
    Clear,
    /// Search orders using the form's filter fields
    Search(OrderFieldArgs),
    /// Print the current order form
    Show,
}

#[derive(Subcommand)]
enum ItemCommands {
    /// Create an item under the form's order id
    Create(ItemFieldArgs),
    /// Update the item named by the form's ids
    Update(ItemFieldArgs),
    /// Fetch one item into the form
    Retrieve(ItemIdArgs),
    /// Delete the item named by the form's ids
    Delete(ItemIdArgs),
    /// Blank the whole item form
    Clear,
    /// Search the order's items using the form's filter fields
    Search(ItemFieldArgs),
    /// Print the current item form
    Show,
}

/// Every flag is optional: a given flag overwrites that form field
/// before the action runs, everything else rides the persisted form.
#[derive(Args)]
struct OrderFieldArgs {
    #[arg(long, help = "Order identifier (sets the form's id field)")]
    id: Option<String>,
    #[arg(long)]
    customer_id: Option<String>,
    #[arg(long)]
    order_date: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    shipping_address: Option<String>,
    #[arg(long)]
    total_amount: Option<String>,
    #[arg(long)]
    payment_method: Option<String>,
    #[arg(long)]
    shipping_cost: Option<String>,
    #[arg(long)]
    expected_date: Option<String>,
    #[arg(long)]
    order_notes: Option<String>,
}

impl OrderFieldArgs {
    fn apply_to(&self, form: &mut OrderForm) {
        let fields = [
            (&self.id, &mut form.order_id),
            (&self.customer_id, &mut form.customer_id),
            (&self.order_date, &mut form.order_date),
            (&self.status, &mut form.status),
            (&self.shipping_address, &mut form.shipping_address),
            (&self.total_amount, &mut form.total_amount),
            (&self.payment_method, &mut form.payment_method),
            (&self.shipping_cost, &mut form.shipping_cost),
            (&self.expected_date, &mut form.expected_date),
            (&self.order_notes, &mut form.order_notes),
        ];
        for (flag, field) in fields {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
    }
}

#[derive(Args)]
struct OrderIdArg {
    #[arg(long, help = "Order identifier (sets the form's id field)")]
    id: Option<String>,
}

#[derive(Args)]
struct ItemFieldArgs {
    #[arg(long, help = "Item identifier (sets the form's item id field)")]
    id: Option<String>,
    #[arg(long, help = "Order the item belongs to")]
    order_id: Option<String>,
    #[arg(long)]
    product_id: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    unit_price: Option<String>,
    #[arg(long)]
    total_price: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl ItemFieldArgs {
    fn apply_to(&self, form: &mut ItemForm) {
        let fields = [
            (&self.id, &mut form.item_id),
            (&self.order_id, &mut form.order_id),
            (&self.product_id, &mut form.product_id),
            (&self.name, &mut form.name),
            (&self.quantity, &mut form.quantity),
            (&self.unit_price, &mut form.unit_price),
            (&self.total_price, &mut form.total_price),
            (&self.description, &mut form.description),
        ];
        for (flag, field) in fields {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
    }
}

#[derive(Args)]
struct ItemIdArgs {
    #[arg(long, help = "Item identifier (sets the form's item id field)")]
    id: Option<String>,
    #[arg(long, help = "Order the item belongs to")]
    order_id: Option<String>,
}

/// The persisted forms: the CLI equivalent of the page's DOM inputs,
/// the only memory carried between invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredForms {
    #[serde(default)]
    order: OrderForm,
    #[serde(default)]
    item: ItemForm,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

async fn handle_order_command(
    api: OrdersApi,
    state: &mut StoredForms,
    command: OrderCommands,
    json: bool,
    html: bool,
) -> Result<()> {
    let is_search = matches!(&command, OrderCommands::Search(_));
    let mut controller = OrderController::with_form(api, state.order.clone());

    match command {
        OrderCommands::Create(args) => {
            args.apply_to(controller.form_mut());
            controller.create().await;
        }
        OrderCommands::Update(args) => {
            args.apply_to(controller.form_mut());
            controller.update().await;
        }
        OrderCommands::Retrieve(arg) => {
            if let Some(id) = arg.id {
                controller.form_mut().order_id = id;
            }
            controller.retrieve().await;
        }
        OrderCommands::Delete(arg) => {
            if let Some(id) = arg.id {
                controller.form_mut().order_id = id;
            }
            controller.delete().await;
        }
        OrderCommands::Cancel(arg) => {
            if let Some(id) = arg.id {
                controller.form_mut().order_id = id;
            }
            controller.cancel().await;
        }
        OrderCommands::Clear => controller.clear(),
        OrderCommands::Search(args) => {
            args.apply_to(controller.form_mut());
            controller.search().await;
        }
        OrderCommands::Show => {}
    }

    if !controller.flash().is_empty() {
        println!("{}", controller.flash());
    }
    if is_search {
        if html {
            println!("{}", controller.results_html());
        } else if json {
            print_json(&controller.results())?;
        } else {
            println!("Orders ({} result(s))", controller.results().len());
            for record in controller.results() {
                println!("{}", render::order_line(record));
            }
        }
    } else if json {
        print_json(controller.form())?;
    } else {
        render_order_form(controller.form());
    }

    state.order = controller.form().clone();
    Ok(())
}

async fn handle_item_command(
    api: OrdersApi,
    state: &mut StoredForms,
    command: ItemCommands,
    json: bool,
    html: bool,
) -> Result<()> {
    let is_search = matches!(&command, ItemCommands::Search(_));
    let mut controller = ItemController::with_form(api, state.item.clone());

    match command {
        ItemCommands::Create(args) => {
            args.apply_to(controller.form_mut());
            controller.create().await;
        }
        ItemCommands::Update(args) => {
            args.apply_to(controller.form_mut());
            controller.update().await;
        }
        ItemCommands::Retrieve(args) => {
            apply_item_ids(args, controller.form_mut());
            controller.retrieve().await;
        }
        ItemCommands::Delete(args) => {
            apply_item_ids(args, controller.form_mut());
            controller.delete().await;
        }
        ItemCommands::Clear => controller.clear(),
        ItemCommands::Search(args) => {
            args.apply_to(controller.form_mut());
            controller.search().await;
        }
        ItemCommands::Show => {}
    }

    if !controller.flash().is_empty() {
        println!("{}", controller.flash());
    }
    if is_search {
        if html {
            println!("{}", controller.results_html());
        } else if json {
            print_json(&controller.results())?;
        } else {
            println!("Items ({} result(s))", controller.results().len());
            for record in controller.results() {
                println!("{}", render::item_line(record));
            }
        }
    } else if json {
        print_json(controller.form())?;
    } else {
        render_item_form(controller.form());
    }

    state.item = controller.form().clone();
    Ok(())
}

fn apply_item_ids(args: ItemIdArgs, form: &mut ItemForm) {
    if let Some(id) = args.id {
        form.item_id = id;
    }
    if let Some(order_id) = args.order_id {
        form.order_id = order_id;
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_order_form(form: &OrderForm) {
    println!("Order form:");
    println!("  id:               {}", form.order_id);
    println!("  customer_id:      {}", form.customer_id);
    println!("  order_date:       {}", form.order_date);
    println!("  status:           {}", form.status);
    println!("  shipping_address: {}", form.shipping_address);
    println!("  total_amount:     {}", form.total_amount);
    println!("  payment_method:   {}", form.payment_method);
    println!("  shipping_cost:    {}", form.shipping_cost);
    println!("  expected_date:    {}", form.expected_date);
    println!("  order_notes:      {}", form.order_notes);
}

fn render_item_form(form: &ItemForm) {
    println!("Item form:");
    println!("  id:          {}", form.item_id);
    println!("  order_id:    {}", form.order_id);
    println!("  product_id:  {}", form.product_id);
    println!("  name:        {}", form.name);
    println!("  quantity:    {}", form.quantity);
    println!("  unit_price:  {}", form.unit_price);
    println!("  total_price: {}", form.total_price);
    println!("  description: {}", form.description);
}

fn form_state_path(cfg: &ClientConfig) -> PathBuf {
    cfg.state_dir().join("form.json")
}

fn load_state(path: &Path) -> Result<StoredForms> {
    if !path.exists() {
        return Ok(StoredForms::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read form state {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse form state {}", path.display()))
}

fn save_state(path: &Path, state: &mut StoredForms) -> Result<()> {
    state.saved_at = Some(Utc::now());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    let payload = serde_json::to_vec_pretty(state)?;
    fs::write(path, payload).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}
