use vendo_core::MachineId;
use vendo_currency::Coin;
use vendo_machine::VendingMachine;
use vendo_products::Product;

#[test]
fn exact_change_purchase_ends_idle() {
    let mut machine = VendingMachine::new(MachineId::new());
    machine.add_inventory_units(Product::Chips, 10);
    machine.add_inventory(Product::Soda);
    machine.add_inventory_units(Product::Candy, 10);

    machine.insert_coin(Coin::Dollar);
    machine.insert_coin(Coin::Quarter);
    assert_eq!(machine.display(), "$1.25");

    machine.vend(Product::Soda);

    assert_eq!(machine.item_bin(), &[Product::Soda]);
    assert!(machine.coin_return().is_empty());
    assert_eq!(machine.display(), "INSERT COIN");
    assert_eq!(machine.inventory_level(Product::Soda), 0);
}

#[test]
fn rejected_coins_come_straight_back() {
    let mut machine = VendingMachine::new(MachineId::new());

    machine.insert_coin(Coin::Penny);
    machine.insert_coin(Coin::HalfDollar);
    machine.insert_coin(Coin::SilverDollar);

    assert_eq!(
        machine.coin_return(),
        &[Coin::Penny, Coin::HalfDollar, Coin::SilverDollar]
    );
    assert_eq!(machine.display(), "INSERT COIN");
    assert_eq!(machine.coins_held(), 0);
}

#[test]
fn change_is_paid_from_earlier_insertions() {
    let mut machine = VendingMachine::new(MachineId::new());
    machine.add_inventory(Product::Soda);

    machine.insert_coin(Coin::Quarter);
    machine.insert_coin(Coin::Dime);
    machine.insert_coin(Coin::Nickel);
    machine.insert_coin(Coin::Dollar);
    assert_eq!(machine.display(), "$1.40");

    machine.vend(Product::Soda);

    assert_eq!(machine.coin_return(), &[Coin::Dime, Coin::Nickel]);
    assert_eq!(machine.item_bin(), &[Product::Soda]);
    assert_eq!(machine.display(), "INSERT COIN");
}

#[test]
fn abandoned_credit_is_refunded_on_the_lever() {
    let mut machine = VendingMachine::new(MachineId::new());

    machine.insert_coin(Coin::Dime);
    machine.insert_coin(Coin::Dime);
    machine.insert_coin(Coin::Nickel);
    assert_eq!(machine.display(), "$0.25");

    machine.return_coins();

    assert_eq!(machine.coin_return(), &[Coin::Nickel, Coin::Dime, Coin::Dime]);
    assert_eq!(machine.display(), "INSERT COIN");
    assert_eq!(machine.coins_held(), 0);
}

#[test]
fn sold_out_selection_refuses_and_keeps_credit() {
    let mut machine = VendingMachine::new(MachineId::new());
    machine.add_inventory(Product::Soda);

    machine.insert_coin(Coin::Dollar);
    machine.insert_coin(Coin::Quarter);
    machine.vend(Product::Soda);
    assert_eq!(machine.inventory_level(Product::Soda), 0);

    machine.insert_coin(Coin::Dollar);
    machine.insert_coin(Coin::Quarter);
    machine.vend(Product::Soda);

    assert_eq!(machine.item_bin(), &[Product::Soda]);
    assert_eq!(machine.display(), "$1.25");
}

#[test]
fn underfunded_selection_refuses_and_keeps_credit() {
    let mut machine = VendingMachine::new(MachineId::new());
    machine.add_inventory_units(Product::Candy, 5);

    machine.insert_coin(Coin::Quarter);
    machine.insert_coin(Coin::Quarter);
    machine.vend(Product::Candy);

    assert!(machine.item_bin().is_empty());
    assert_eq!(machine.inventory_level(Product::Candy), 5);
    assert_eq!(machine.display(), "$0.50");
}

#[test]
fn catalog_always_lists_three_products() {
    let machine = VendingMachine::new(MachineId::new());

    assert_eq!(machine.products().len(), 3);
    assert!(machine.products().contains(&Product::Candy));
    assert!(machine.products().contains(&Product::Chips));
    assert!(machine.products().contains(&Product::Soda));
}

#[test]
fn a_full_service_day() {
    let mut machine = VendingMachine::new(MachineId::new());
    machine.add_inventory_units(Product::Chips, 10);
    machine.add_inventory_units(Product::Candy, 10);
    machine.add_inventory(Product::Soda);

    // First customer: exact change for chips.
    machine.insert_coin(Coin::Quarter);
    machine.insert_coin(Coin::Quarter);
    machine.vend(Product::Chips);
    assert_eq!(machine.display(), "INSERT COIN");
    assert_eq!(machine.item_bin(), &[Product::Chips]);

    // Second customer: exact change for the last soda.
    machine.insert_coin(Coin::Dollar);
    machine.insert_coin(Coin::Quarter);
    machine.vend(Product::Soda);
    assert_eq!(machine.cash(Coin::Quarter), 3);
    assert_eq!(machine.cash(Coin::Dollar), 1);
    assert_eq!(machine.coins_held(), 4);

    // Third customer: a penny bounces, a dollar buys candy. The till has no
    // small coins beyond quarters, so a dime of change stays as credit.
    machine.insert_coin(Coin::Penny);
    machine.insert_coin(Coin::Dollar);
    machine.vend(Product::Candy);
    assert_eq!(machine.coin_return(), &[Coin::Penny, Coin::Quarter]);
    assert_eq!(machine.display(), "$0.10");

    // They give up and pull the lever, which drains the whole till.
    machine.return_coins();
    assert_eq!(
        machine.coin_return(),
        &[
            Coin::Penny,
            Coin::Quarter,
            Coin::Quarter,
            Coin::Quarter,
            Coin::Dollar,
            Coin::Dollar,
        ]
    );
    assert_eq!(machine.display(), "INSERT COIN");
    assert_eq!(machine.coins_held(), 0);

    assert_eq!(machine.item_bin(), &[Product::Chips, Product::Soda, Product::Candy]);
    assert_eq!(machine.inventory_level(Product::Chips), 9);
    assert_eq!(machine.inventory_level(Product::Candy), 9);
    assert_eq!(machine.inventory_level(Product::Soda), 0);
}
