mod common;

use mesa_orders::domain::branch::{Branch, NewBranch, NewRestaurantTable};
use mesa_orders::domain::branch_product::{NewBranchProduct, NewBranchProductSize};
use mesa_orders::domain::modifier::NewModifier;
use mesa_orders::domain::order::{
    DiscountSource, NewOrder, NewOrderItem, OrderListQuery, OrderStatus, OrderType,
    SelectedModifier, StatusTransition, format_order_code,
};
use mesa_orders::domain::product::{NewProduct, Product};
use mesa_orders::domain::size::NewSize;
use mesa_orders::repository::errors::RepositoryError;
use mesa_orders::repository::{
    BranchReader, BranchWriter, CatalogReader, CatalogWriter, DieselRepository, OrderReader,
    OrderWriter,
};

use common::TestDb;

const TENANT_ID: i32 = 1;

fn seed_branch(repo: &DieselRepository) -> Branch {
    repo.create_branch(&NewBranch::new(TENANT_ID, "Downtown").with_tax(10.0, "VAT"))
        .unwrap()
}

fn seed_product(repo: &DieselRepository, name: &str, base_cents: i64) -> Product {
    repo.create_product(&NewProduct::new(TENANT_ID, name, base_cents))
        .unwrap()
}

fn priced_item(product: &Product, quantity: i32) -> NewOrderItem {
    NewOrderItem {
        product_id: product.id,
        product_name: product.name.clone(),
        size_id: None,
        size_name: None,
        branch_product_size_id: None,
        base_price_cents: product.base_price_cents,
        original_price_cents: product.base_price_cents,
        modifier_total_cents: 0,
        item_discount_cents: 0,
        discount_percentage: 0.0,
        discount_source: DiscountSource::None,
        final_unit_price_cents: product.base_price_cents,
        quantity,
        selected_modifiers: Vec::new(),
        remark: None,
    }
}

#[test]
fn test_branch_and_table_round_trip() {
    let test_db = TestDb::new("test_branch_and_table_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    assert_eq!(branch.name, "Downtown");
    assert!(branch.tax_is_active);
    assert_eq!(branch.tax_rate, 10.0);

    let table = repo
        .create_table(&NewRestaurantTable::new(branch.id, "T4", "tok-t4"))
        .unwrap();

    let found = repo.get_branch_by_id(branch.id).unwrap().unwrap();
    assert_eq!(found.id, branch.id);

    let by_token = repo.get_table_by_token("tok-t4").unwrap().unwrap();
    assert_eq!(by_token.id, table.id);
    assert_eq!(by_token.branch_id, branch.id);

    assert!(repo.get_table_by_token("missing").unwrap().is_none());
}

#[test]
fn test_catalog_is_tenant_scoped() {
    let test_db = TestDb::new("test_catalog_is_tenant_scoped.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = seed_product(&repo, "Margherita", 1000);
    let size = repo.create_size(&NewSize::new(TENANT_ID, "Large")).unwrap();
    let modifier = repo
        .create_modifier(&NewModifier::new(TENANT_ID, "Extra cheese", 100))
        .unwrap();

    assert!(
        repo.get_product_by_id(product.id, TENANT_ID)
            .unwrap()
            .is_some()
    );
    assert!(
        repo.get_product_by_id(product.id, TENANT_ID + 1)
            .unwrap()
            .is_none()
    );
    assert!(repo.get_size_by_id(size.id, TENANT_ID).unwrap().is_some());
    assert!(
        repo.get_size_by_id(size.id, TENANT_ID + 1)
            .unwrap()
            .is_none()
    );

    let found = repo
        .list_modifiers_by_ids(&[modifier.id], TENANT_ID)
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].price_cents, 100);
    assert!(
        repo.list_modifiers_by_ids(&[modifier.id], TENANT_ID + 1)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_override_layers_round_trip() {
    let test_db = TestDb::new("test_override_layers_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let product = seed_product(&repo, "Margherita", 1000);
    let size = repo.create_size(&NewSize::new(TENANT_ID, "Large")).unwrap();

    let branch_product = repo
        .create_branch_product(
            &NewBranchProduct::new(branch.id, product.id)
                .with_branch_price(800)
                .with_discount(10.0, true),
        )
        .unwrap();
    let size_override = repo
        .create_branch_product_size(
            &NewBranchProductSize::new(branch_product.id, size.id).with_size_price(1200),
        )
        .unwrap();

    let found = repo
        .get_branch_product(branch.id, product.id)
        .unwrap()
        .unwrap();
    assert_eq!(found.branch_price_cents, Some(800));
    assert_eq!(found.discount_percentage, 10.0);
    assert!(found.has_active_discount);

    let found_size = repo
        .get_branch_product_size(branch_product.id, size.id)
        .unwrap()
        .unwrap();
    assert_eq!(found_size.id, size_override.id);
    assert_eq!(found_size.branch_size_price_cents, Some(1200));
    assert!(!found_size.is_discount_active);

    assert!(
        repo.get_branch_product_size(branch_product.id, size.id + 1)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_create_order_assigns_sequential_codes() {
    let test_db = TestDb::new("test_create_order_assigns_sequential_codes.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let product = seed_product(&repo, "Margherita", 1000);

    let mut new_order = NewOrder::new(branch.id, OrderType::WalkIn);
    new_order.subtotal_cents = 1000;
    new_order.items = vec![priced_item(&product, 1)];
    let day = new_order.placed_at.date();

    let first = repo.create_order(&new_order).unwrap();
    let second = repo.create_order(&new_order).unwrap();
    let third = repo.create_order(&new_order).unwrap();

    assert_eq!(first.order_code, format_order_code(day, 1));
    assert_eq!(second.order_code, format_order_code(day, 2));
    assert_eq!(third.order_code, format_order_code(day, 3));
    assert_eq!(first.order_date, day);
    assert_eq!(first.status, OrderStatus::Pending);
}

#[test]
fn test_order_codes_are_scoped_per_branch() {
    let test_db = TestDb::new("test_order_codes_are_scoped_per_branch.db");
    let repo = DieselRepository::new(test_db.pool());

    let first_branch = seed_branch(&repo);
    let second_branch = repo
        .create_branch(&NewBranch::new(TENANT_ID, "Riverside"))
        .unwrap();
    let product = seed_product(&repo, "Margherita", 1000);

    let mut new_order = NewOrder::new(first_branch.id, OrderType::WalkIn);
    new_order.subtotal_cents = 1000;
    new_order.items = vec![priced_item(&product, 1)];
    let day = new_order.placed_at.date();

    let first = repo.create_order(&new_order).unwrap();

    new_order.branch_id = second_branch.id;
    let second = repo.create_order(&new_order).unwrap();

    // Each branch starts its daily sequence at 1.
    assert_eq!(first.order_code, format_order_code(day, 1));
    assert_eq!(second.order_code, format_order_code(day, 1));
}

#[test]
fn test_created_order_freezes_its_items() {
    let test_db = TestDb::new("test_created_order_freezes_its_items.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let product = seed_product(&repo, "Margherita", 1000);

    let mut item = priced_item(&product, 2);
    item.base_price_cents = 800;
    item.modifier_total_cents = 100;
    item.item_discount_cents = 160;
    item.discount_percentage = 10.0;
    item.discount_source = DiscountSource::BranchProduct;
    item.final_unit_price_cents = 820;
    item.selected_modifiers = vec![SelectedModifier {
        id: 5,
        name: "Extra cheese".to_string(),
        price_cents: 100,
    }];
    item.remark = Some("+Extra cheese no onions".to_string());

    let mut new_order = NewOrder::new(branch.id, OrderType::WalkIn);
    new_order.subtotal_cents = 1800;
    new_order.item_discount_cents = 160;
    new_order.tax_rate = 10.0;
    new_order.tax_amount_cents = 164;
    new_order.items = vec![item];

    let created = repo.create_order(&new_order).unwrap();
    let loaded = repo
        .get_order_by_id(created.id, branch.id)
        .unwrap()
        .unwrap();

    assert_eq!(loaded.items.len(), 1);
    let line = &loaded.items[0];
    assert_eq!(line.product_name, "Margherita");
    assert_eq!(line.base_price_cents, 800);
    assert_eq!(line.original_price_cents, 1000);
    assert_eq!(line.modifier_total_cents, 100);
    assert_eq!(line.item_discount_cents, 160);
    assert_eq!(line.discount_source, DiscountSource::BranchProduct);
    assert_eq!(line.final_unit_price_cents, 820);
    assert_eq!(line.line_subtotal_cents(), 1800);
    assert_eq!(
        line.selected_modifiers,
        vec![SelectedModifier {
            id: 5,
            name: "Extra cheese".to_string(),
            price_cents: 100,
        }]
    );
    assert_eq!(line.remark.as_deref(), Some("+Extra cheese no onions"));

    assert_eq!(loaded.taxable_cents(), 1640);
    assert_eq!(loaded.total_cents(), 1804);

    // Scoped lookup: the wrong branch sees nothing.
    assert!(
        repo.get_order_by_id(created.id, branch.id + 1)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_list_orders_filters_and_paginates() {
    let test_db = TestDb::new("test_list_orders_filters_and_paginates.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let table = repo
        .create_table(&NewRestaurantTable::new(branch.id, "T4", "tok-t4"))
        .unwrap();
    let product = seed_product(&repo, "Margherita", 1000);

    let mut new_order = NewOrder::new(branch.id, OrderType::WalkIn);
    new_order.subtotal_cents = 1000;
    new_order.items = vec![priced_item(&product, 1)];

    let first = repo.create_order(&new_order).unwrap();
    let _second = repo.create_order(&new_order).unwrap();

    new_order = new_order.with_table(table.id);
    let third = repo.create_order(&new_order).unwrap();

    repo.advance_status(
        first.id,
        branch.id,
        &StatusTransition::to(OrderStatus::Confirmed),
    )
    .unwrap();

    let (total, all) = repo.list_orders(OrderListQuery::new(branch.id)).unwrap();
    assert_eq!(total, 3);
    assert_eq!(all.len(), 3);

    let (pending_total, pending) = repo
        .list_orders(OrderListQuery::new(branch.id).status(OrderStatus::Pending))
        .unwrap();
    assert_eq!(pending_total, 2);
    assert!(pending.iter().all(|o| o.status == OrderStatus::Pending));

    let (table_total, at_table) = repo
        .list_orders(OrderListQuery::new(branch.id).table_id(table.id))
        .unwrap();
    assert_eq!(table_total, 1);
    assert_eq!(at_table[0].id, third.id);

    let (day_total, _) = repo
        .list_orders(OrderListQuery::new(branch.id).day(first.order_date))
        .unwrap();
    assert_eq!(day_total, 3);

    let (paged_total, page) = repo
        .list_orders(OrderListQuery::new(branch.id).paginate(1, 2))
        .unwrap();
    assert_eq!(paged_total, 3);
    assert_eq!(page.len(), 2);

    let (_, empty) = repo
        .list_orders(OrderListQuery::new(branch.id + 1))
        .unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_advance_status_records_history_and_timestamps() {
    let test_db = TestDb::new("test_advance_status_records_history_and_timestamps.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let product = seed_product(&repo, "Margherita", 1000);

    let mut new_order = NewOrder::new(branch.id, OrderType::WalkIn);
    new_order.subtotal_cents = 1000;
    new_order.items = vec![priced_item(&product, 1)];
    let order = repo.create_order(&new_order).unwrap();

    let confirmed = repo
        .advance_status(
            order.id,
            branch.id,
            &StatusTransition::to(OrderStatus::Confirmed).actor("staff:7"),
        )
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert!(confirmed.cooking_started_at.is_none());

    let cooking = repo
        .advance_status(
            order.id,
            branch.id,
            &StatusTransition::to(OrderStatus::Cooking),
        )
        .unwrap();
    assert!(cooking.cooking_started_at.is_some());
    assert!(cooking.ready_at.is_none());

    let ready = repo
        .advance_status(order.id, branch.id, &StatusTransition::to(OrderStatus::Ready))
        .unwrap();
    assert!(ready.ready_at.is_some());
    assert!(ready.actual_prep_seconds.is_some());
    assert!(ready.actual_prep_seconds.unwrap() >= 0);

    let events = repo.list_status_events(order.id).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].from_status, OrderStatus::Pending);
    assert_eq!(events[0].to_status, OrderStatus::Confirmed);
    assert_eq!(events[0].actor.as_deref(), Some("staff:7"));
    assert_eq!(events[1].to_status, OrderStatus::Cooking);
    assert_eq!(events[2].from_status, OrderStatus::Cooking);
    assert_eq!(events[2].to_status, OrderStatus::Ready);
}

#[test]
fn test_backward_transition_is_rejected_and_unrecorded() {
    let test_db = TestDb::new("test_backward_transition_is_rejected_and_unrecorded.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let product = seed_product(&repo, "Margherita", 1000);

    let mut new_order = NewOrder::new(branch.id, OrderType::WalkIn);
    new_order.subtotal_cents = 1000;
    new_order.items = vec![priced_item(&product, 1)];
    let order = repo.create_order(&new_order).unwrap();

    repo.advance_status(
        order.id,
        branch.id,
        &StatusTransition::to(OrderStatus::Cooking),
    )
    .unwrap();

    let err = repo
        .advance_status(
            order.id,
            branch.id,
            &StatusTransition::to(OrderStatus::Pending),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::InvalidStatusTransition { .. }
    ));

    // The rejected transition leaves no trace.
    let events = repo.list_status_events(order.id).unwrap();
    assert_eq!(events.len(), 1);
    let current = repo.get_order_by_id(order.id, branch.id).unwrap().unwrap();
    assert_eq!(current.status, OrderStatus::Cooking);
}

#[test]
fn test_cancellation_with_note_and_terminal_lock() {
    let test_db = TestDb::new("test_cancellation_with_note_and_terminal_lock.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let product = seed_product(&repo, "Margherita", 1000);

    let mut new_order = NewOrder::new(branch.id, OrderType::WalkIn);
    new_order.subtotal_cents = 1000;
    new_order.items = vec![priced_item(&product, 1)];
    let order = repo.create_order(&new_order).unwrap();

    let cancelled = repo
        .advance_status(
            order.id,
            branch.id,
            &StatusTransition::to(OrderStatus::Cancelled).note("customer left"),
        )
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let events = repo.list_status_events(order.id).unwrap();
    assert_eq!(events[0].note.as_deref(), Some("customer left"));

    let err = repo
        .advance_status(
            order.id,
            branch.id,
            &StatusTransition::to(OrderStatus::Confirmed),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::InvalidStatusTransition { .. }
    ));
}

#[test]
fn test_advance_status_on_missing_order_is_not_found() {
    let test_db = TestDb::new("test_advance_status_on_missing_order_is_not_found.db");
    let repo = DieselRepository::new(test_db.pool());

    let branch = seed_branch(&repo);
    let err = repo
        .advance_status(999, branch.id, &StatusTransition::to(OrderStatus::Confirmed))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}
