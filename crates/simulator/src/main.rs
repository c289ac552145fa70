//! Drives one vending machine through a short service day and logs every
//! domain event as JSON. Useful for eyeballing the event stream without
//! wiring up a real kiosk front end.

use chrono::Utc;
use vendo_core::{AggregateRoot, MachineId};
use vendo_currency::Coin;
use vendo_events::Event;
use vendo_machine::{InsertCoin, MachineCommand, MachineEvent, Vend, VendingMachine};
use vendo_products::Product;

fn main() -> anyhow::Result<()> {
    vendo_observability::init();

    let machine_id = MachineId::new();
    let mut machine = VendingMachine::new(machine_id);
    tracing::info!(%machine_id, "machine powered on");

    // Morning restock.
    for (product, quantity) in [(Product::Chips, 10), (Product::Candy, 10), (Product::Soda, 1)] {
        machine.add_inventory_units(product, quantity);
        tracing::info!(product = %product, price = %product.price(), quantity, "column stocked");
    }

    // First customer pays a dollar and a quarter for the last soda.
    for coin in [Coin::Dollar, Coin::Quarter] {
        let events = machine.execute(&MachineCommand::InsertCoin(InsertCoin {
            machine_id,
            coin,
            occurred_at: Utc::now(),
        }))?;
        log_events(&events);
        tracing::info!(display = %machine.display(), "credit updated");
    }
    let events = machine.execute(&MachineCommand::Vend(Vend {
        machine_id,
        product: Product::Soda,
        occurred_at: Utc::now(),
    }))?;
    log_events(&events);
    tracing::info!(display = %machine.display(), "sale complete");

    // Second customer feeds the reader every slug it refuses.
    for coin in [Coin::Penny, Coin::HalfDollar, Coin::SilverDollar] {
        machine.insert_coin(coin);
    }
    tracing::info!(tray = ?machine.coin_return(), "rejected coins bounced to the tray");

    // Third customer pays toward candy, then changes their mind. The lever
    // drains the whole till, retained float included.
    machine.insert_coin(Coin::Quarter);
    machine.insert_coin(Coin::Quarter);
    tracing::info!(display = %machine.display(), "credit pending");
    machine.return_coins();
    tracing::info!(tray = ?machine.coin_return(), display = %machine.display(), "lever pulled");

    tracing::info!(
        version = machine.version(),
        coins_held = machine.coins_held(),
        items_dispensed = machine.item_bin().len(),
        "end of session"
    );

    Ok(())
}

fn log_events(events: &[MachineEvent]) {
    for event in events {
        tracing::info!(event = event.event_type(), at = %event.occurred_at(), "event recorded");
    }
}
