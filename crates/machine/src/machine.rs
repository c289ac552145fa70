use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendo_core::{Aggregate, AggregateRoot, Cents, DomainError, DomainResult, MachineId};
use vendo_currency::Coin;
use vendo_events::Event;
use vendo_products::Product;

/// Message shown whenever no credit has accumulated.
pub const IDLE_MESSAGE: &str = "INSERT COIN";

/// Coarse credit state, derived from the balance on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    Idle,
    Accumulating,
}

/// Aggregate root: VendingMachine.
///
/// Models one physical machine. Every state change flows through events, so a
/// machine can be rebuilt from its history; the kiosk methods wrap the command
/// path for callers that only care about the observable surface (display,
/// trays, bins). Unknown denominations and unknown selections cannot be
/// expressed at all, which leaves out-of-stock, short credit and zero-quantity
/// restocks as the only refusal paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendingMachine {
    id: MachineId,
    balance: Cents,
    coin_bins: HashMap<Coin, u32>,
    coin_return: Vec<Coin>,
    item_bin: Vec<Product>,
    inventory: HashMap<Product, u32>,
    version: u64,
}

impl VendingMachine {
    /// Create a machine with empty bins, zero credit and zero stock.
    pub fn new(id: MachineId) -> Self {
        Self {
            id,
            balance: Cents::ZERO,
            coin_bins: Coin::ACCEPTED.iter().map(|&coin| (coin, 0)).collect(),
            coin_return: Vec::new(),
            item_bin: Vec::new(),
            inventory: Product::ALL.iter().map(|&product| (product, 0)).collect(),
            version: 0,
        }
    }

    /// Rebuild a machine by folding a recorded event history into a fresh one.
    pub fn replay(id: MachineId, history: &[MachineEvent]) -> Self {
        vendo_core::replay(Self::new(id), history)
    }

    /// Customer-facing display line.
    ///
    /// Derived, never stored: the idle prompt when no credit has accumulated,
    /// otherwise the credit formatted as dollars and cents.
    pub fn display(&self) -> String {
        if self.balance.is_zero() {
            IDLE_MESSAGE.to_string()
        } else {
            self.balance.to_string()
        }
    }

    /// Credit state, derived the same way as the display.
    pub fn state(&self) -> MachineState {
        if self.balance.is_zero() {
            MachineState::Idle
        } else {
            MachineState::Accumulating
        }
    }

    /// Accumulated credit.
    pub fn balance(&self) -> Cents {
        self.balance
    }

    /// Count of a denomination held in the machine's bins.
    ///
    /// Rejected denominations are never binned, so their count is always zero.
    pub fn cash(&self, coin: Coin) -> u32 {
        self.coin_bins.get(&coin).copied().unwrap_or(0)
    }

    /// Total number of coins across all bins.
    pub fn coins_held(&self) -> u32 {
        self.coin_bins.values().sum()
    }

    pub fn coin_bins(&self) -> &HashMap<Coin, u32> {
        &self.coin_bins
    }

    /// Return-tray contents, oldest first.
    ///
    /// The customer scoops the tray out-of-band; the machine itself never
    /// clears it.
    pub fn coin_return(&self) -> &[Coin] {
        &self.coin_return
    }

    /// Dispensed products awaiting pickup, oldest first.
    pub fn item_bin(&self) -> &[Product] {
        &self.item_bin
    }

    /// Stock on hand for a product; zero when never stocked.
    pub fn inventory_level(&self, product: Product) -> u32 {
        self.inventory.get(&product).copied().unwrap_or(0)
    }

    /// The selection panel: every product the machine sells, stocked or not.
    pub fn products(&self) -> &'static [Product] {
        &Product::ALL
    }
}

impl AggregateRoot for VendingMachine {
    type Id = MachineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: InsertCoin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertCoin {
    pub machine_id: MachineId,
    pub coin: Coin,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReturnCoins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnCoins {
    pub machine_id: MachineId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddInventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddInventory {
    pub machine_id: MachineId,
    pub product: Product,
    /// Units to add on top of current stock; defaults to a single unit.
    #[serde(default = "one_unit")]
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

fn one_unit() -> u32 {
    1
}

/// Command: Vend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vend {
    pub machine_id: MachineId,
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineCommand {
    InsertCoin(InsertCoin),
    ReturnCoins(ReturnCoins),
    AddInventory(AddInventory),
    Vend(Vend),
}

/// Event: CoinAccepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinAccepted {
    pub machine_id: MachineId,
    pub coin: Coin,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CoinRejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRejected {
    pub machine_id: MachineId,
    pub coin: Coin,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CoinsReturned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinsReturned {
    pub machine_id: MachineId,
    /// Refunded coins in the order they reach the tray.
    pub coins: Vec<Coin>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdded {
    pub machine_id: MachineId,
    pub product: Product,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductVended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVended {
    pub machine_id: MachineId,
    pub product: Product,
    pub price: Cents,
    /// Change dispensed to the tray, largest denomination first.
    pub change: Vec<Coin>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineEvent {
    CoinAccepted(CoinAccepted),
    CoinRejected(CoinRejected),
    CoinsReturned(CoinsReturned),
    StockAdded(StockAdded),
    ProductVended(ProductVended),
}

impl Event for MachineEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MachineEvent::CoinAccepted(_) => "vending.machine.coin_accepted",
            MachineEvent::CoinRejected(_) => "vending.machine.coin_rejected",
            MachineEvent::CoinsReturned(_) => "vending.machine.coins_returned",
            MachineEvent::StockAdded(_) => "vending.machine.stock_added",
            MachineEvent::ProductVended(_) => "vending.machine.product_vended",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            MachineEvent::CoinAccepted(e) => e.occurred_at,
            MachineEvent::CoinRejected(e) => e.occurred_at,
            MachineEvent::CoinsReturned(e) => e.occurred_at,
            MachineEvent::StockAdded(e) => e.occurred_at,
            MachineEvent::ProductVended(e) => e.occurred_at,
        }
    }
}

impl Aggregate for VendingMachine {
    type Command = MachineCommand;
    type Event = MachineEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            MachineEvent::CoinAccepted(e) => {
                *self.coin_bins.entry(e.coin).or_insert(0) += 1;
                self.balance += e.coin.face_value();
            }
            MachineEvent::CoinRejected(e) => {
                self.coin_return.push(e.coin);
            }
            MachineEvent::CoinsReturned(e) => {
                for coin in &e.coins {
                    if let Some(count) = self.coin_bins.get_mut(coin) {
                        *count = count.saturating_sub(1);
                    }
                    self.coin_return.push(*coin);
                }
                self.balance = Cents::ZERO;
            }
            MachineEvent::StockAdded(e) => {
                let count = self.inventory.entry(e.product).or_insert(0);
                *count = count.saturating_add(e.quantity);
            }
            MachineEvent::ProductVended(e) => {
                if let Some(count) = self.inventory.get_mut(&e.product) {
                    *count = count.saturating_sub(1);
                }
                self.item_bin.push(e.product);

                let mut dispensed = Cents::ZERO;
                for coin in &e.change {
                    if let Some(count) = self.coin_bins.get_mut(coin) {
                        *count = count.saturating_sub(1);
                    }
                    self.coin_return.push(*coin);
                    dispensed += coin.face_value();
                }

                // Change the bins could not cover stays behind as credit.
                self.balance = self.balance.saturating_sub(e.price + dispensed);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            MachineCommand::InsertCoin(cmd) => self.handle_insert_coin(cmd),
            MachineCommand::ReturnCoins(cmd) => self.handle_return_coins(cmd),
            MachineCommand::AddInventory(cmd) => self.handle_add_inventory(cmd),
            MachineCommand::Vend(cmd) => self.handle_vend(cmd),
        }
    }
}

impl VendingMachine {
    fn ensure_machine_id(&self, machine_id: MachineId) -> Result<(), DomainError> {
        if self.id != machine_id {
            return Err(DomainError::invariant("machine_id mismatch"));
        }
        Ok(())
    }

    fn handle_insert_coin(&self, cmd: &InsertCoin) -> Result<Vec<MachineEvent>, DomainError> {
        self.ensure_machine_id(cmd.machine_id)?;

        // Every recognized coin produces an outcome; insertion itself never
        // fails. The decision is per coin, independent of history.
        if cmd.coin.is_accepted() {
            Ok(vec![MachineEvent::CoinAccepted(CoinAccepted {
                machine_id: cmd.machine_id,
                coin: cmd.coin,
                occurred_at: cmd.occurred_at,
            })])
        } else {
            Ok(vec![MachineEvent::CoinRejected(CoinRejected {
                machine_id: cmd.machine_id,
                coin: cmd.coin,
                occurred_at: cmd.occurred_at,
            })])
        }
    }

    fn handle_return_coins(&self, cmd: &ReturnCoins) -> Result<Vec<MachineEvent>, DomainError> {
        self.ensure_machine_id(cmd.machine_id)?;

        // Everything currently binned comes back, multiplicity preserved,
        // in ascending denomination order.
        let mut coins = Vec::new();
        for coin in Coin::ACCEPTED {
            for _ in 0..self.cash(coin) {
                coins.push(coin);
            }
        }

        if coins.is_empty() && self.balance.is_zero() {
            return Ok(vec![]);
        }

        Ok(vec![MachineEvent::CoinsReturned(CoinsReturned {
            machine_id: cmd.machine_id,
            coins,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_inventory(&self, cmd: &AddInventory) -> Result<Vec<MachineEvent>, DomainError> {
        self.ensure_machine_id(cmd.machine_id)?;

        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity cannot be zero"));
        }

        if self.inventory_level(cmd.product).checked_add(cmd.quantity).is_none() {
            return Err(DomainError::invariant("stock count would overflow"));
        }

        Ok(vec![MachineEvent::StockAdded(StockAdded {
            machine_id: cmd.machine_id,
            product: cmd.product,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_vend(&self, cmd: &Vend) -> Result<Vec<MachineEvent>, DomainError> {
        self.ensure_machine_id(cmd.machine_id)?;

        // Stock is checked before funds: a sold-out column refuses the sale
        // before any money question arises.
        if self.inventory_level(cmd.product) == 0 {
            return Err(DomainError::out_of_stock(cmd.product.to_string()));
        }

        let price = cmd.product.price();
        let overpay = match self.balance.checked_sub(price) {
            Some(overpay) => overpay,
            None => return Err(DomainError::insufficient_funds(price, self.balance)),
        };

        Ok(vec![MachineEvent::ProductVended(ProductVended {
            machine_id: cmd.machine_id,
            product: cmd.product,
            price,
            change: self.make_change(overpay),
            occurred_at: cmd.occurred_at,
        })])
    }

    /// Greedy change: walk accepted denominations largest first, bounded by
    /// what the bins actually hold. Whatever cannot be covered stays with the
    /// machine as retained credit.
    fn make_change(&self, mut due: Cents) -> Vec<Coin> {
        let mut change = Vec::new();
        for &coin in Coin::ACCEPTED.iter().rev() {
            let mut available = self.cash(coin);
            while available > 0 && coin.face_value() <= due {
                due = due.saturating_sub(coin.face_value());
                change.push(coin);
                available -= 1;
            }
        }
        change
    }
}

impl VendingMachine {
    /// Handle a command and fold the resulting events into state.
    ///
    /// The in-process equivalent of a dispatch pipeline: decide first, apply
    /// after. Nothing is applied when the decision fails, so a refused command
    /// leaves the machine exactly as it was.
    pub fn execute(&mut self, command: &MachineCommand) -> DomainResult<Vec<MachineEvent>> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }

    /// Drop a coin into the slot.
    ///
    /// The slot has no error channel: rejected coins simply land in the
    /// return tray.
    pub fn insert_coin(&mut self, coin: Coin) {
        let command = MachineCommand::InsertCoin(InsertCoin {
            machine_id: self.id,
            coin,
            occurred_at: Utc::now(),
        });
        self.execute_silently(command);
    }

    /// Press the coin-return lever: every binned coin drops into the tray and
    /// the credit resets.
    pub fn return_coins(&mut self) {
        let command = MachineCommand::ReturnCoins(ReturnCoins {
            machine_id: self.id,
            occurred_at: Utc::now(),
        });
        self.execute_silently(command);
    }

    /// Restock a single unit of a product.
    pub fn add_inventory(&mut self, product: Product) {
        self.add_inventory_units(product, 1);
    }

    /// Restock `quantity` units of a product on top of current stock.
    pub fn add_inventory_units(&mut self, product: Product, quantity: u32) {
        let command = MachineCommand::AddInventory(AddInventory {
            machine_id: self.id,
            product,
            quantity,
            occurred_at: Utc::now(),
        });
        self.execute_silently(command);
    }

    /// Select a product.
    ///
    /// On success the product drops into the item bin and change, if any, into
    /// the tray. A refused selection changes nothing; the display keeps
    /// showing the credit.
    pub fn vend(&mut self, product: Product) {
        let command = MachineCommand::Vend(Vend {
            machine_id: self.id,
            product,
            occurred_at: Utc::now(),
        });
        self.execute_silently(command);
    }

    // A kiosk refusal is not an error to the customer; the machine just sits
    // there. Log it and move on.
    fn execute_silently(&mut self, command: MachineCommand) {
        if let Err(error) = self.execute(&command) {
            tracing::debug!(%error, ?command, "vending command refused");
        }
    }
}
