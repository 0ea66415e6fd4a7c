//! End-to-end order flow over a temporary database
//!
//! Covers cart accumulation, discount quoting, coupon application,
//! frozen price snapshots, vanished products and the status graph.

use store_server::cart::CartStore;
use store_server::db::DbService;
use store_server::db::repository::{coupon, discount, order, product, user};
use store_server::orders;
use store_server::pricing;
use store_server::utils::AppError;

use shared::models::{
    CouponCreate, DiscountBasketCreate, OrderStatus, ProductCreate,
};
use sqlx::SqlitePool;

async fn setup() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    (dir, db.pool)
}

async fn seed_product(pool: &SqlitePool, title: &str, slug: &str, price: i64) -> i64 {
    product::create(
        pool,
        ProductCreate {
            title: title.to_string(),
            slug: slug.to_string(),
            brand_id: None,
            price,
            description: None,
            image: None,
            is_drive: None,
            category_ids: vec![],
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_user(pool: &SqlitePool, phone: &str) -> i64 {
    user::find_or_create_by_phone(pool, phone).await.unwrap().id
}

#[tokio::test]
async fn checkout_freezes_prices_and_clears_cart() {
    let (_dir, pool) = setup().await;
    let product_id = seed_product(&pool, "Mechanical Keyboard", "mech-kb", 1000).await;
    let user_id = seed_user(&pool, "09120000001").await;

    let cart = CartStore::new();
    let line = orders::snapshot_line(&pool, product_id, 2, None).await.unwrap();
    assert_eq!(line.unit_price, 1000);
    cart.add("s1", line);

    // Price rises after the cart snapshot; the order must keep 1000
    product::update(
        &pool,
        product_id,
        shared::models::ProductUpdate {
            title: None,
            slug: None,
            brand_id: None,
            price: Some(2000),
            description: None,
            image: None,
            is_drive: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let result = orders::checkout(&pool, &cart, "s1", user_id, "12 Example Street, Springfield", None)
        .await
        .unwrap();

    assert_eq!(result.total_price, 2000);
    assert_eq!(result.final_price, 2000);
    assert!(result.skipped_product_ids.is_empty());
    assert_eq!(result.order.status, OrderStatus::Pending);
    assert!(cart.items("s1").is_empty());

    let lines = order::find_lines(&pool, result.order.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].unit_price, 1000);
    assert_eq!(lines[0].quantity, 2);
}

#[tokio::test]
async fn discount_basket_lowers_the_cart_snapshot() {
    let (_dir, pool) = setup().await;
    let product_id = seed_product(&pool, "Headphones", "headphones", 1000).await;

    let now = shared::util::now_millis();
    discount::create(
        &pool,
        DiscountBasketCreate {
            title: "Autumn sale".to_string(),
            discount: 10,
            start_at: now - 1_000,
            end_at: now + 3_600_000,
            product_ids: vec![product_id],
        },
    )
    .await
    .unwrap();

    let quote = pricing::quote_product(&pool, product_id, 1000).await.unwrap();
    assert_eq!(quote.discount, 10);
    assert_eq!(quote.effective_price, 900);

    let line = orders::snapshot_line(&pool, product_id, 3, None).await.unwrap();
    assert_eq!(line.unit_price, 900);
    assert_eq!(line.line_total(), 2700);
}

#[tokio::test]
async fn coupon_discount_is_applied_with_truncation() {
    let (_dir, pool) = setup().await;
    let product_id = seed_product(&pool, "Mouse Pad", "mouse-pad", 33).await;
    let user_id = seed_user(&pool, "09120000002").await;

    let now = shared::util::now_millis();
    coupon::create(
        &pool,
        CouponCreate {
            code: "WELCOME10".to_string(),
            discount: 10,
            start_at: now - 1_000,
            end_at: now + 3_600_000,
        },
    )
    .await
    .unwrap();

    let cart = CartStore::new();
    let line = orders::snapshot_line(&pool, product_id, 3, None).await.unwrap();
    cart.add("s2", line);

    let result = orders::checkout(
        &pool,
        &cart,
        "s2",
        user_id,
        "45 Sample Avenue, Shelbyville",
        Some("WELCOME10"),
    )
    .await
    .unwrap();

    // 99 total, 10% off -> 9.9 truncates to 9, final 90
    assert_eq!(result.total_price, 99);
    assert_eq!(result.final_price, 90);
    assert_eq!(result.order.discount, 10);
    assert_eq!(result.order.coupon_code.as_deref(), Some("WELCOME10"));
}

#[tokio::test]
async fn invalid_coupon_rejects_checkout() {
    let (_dir, pool) = setup().await;
    let product_id = seed_product(&pool, "Desk Lamp", "desk-lamp", 500).await;
    let user_id = seed_user(&pool, "09120000003").await;

    let cart = CartStore::new();
    let line = orders::snapshot_line(&pool, product_id, 1, None).await.unwrap();
    cart.add("s3", line);

    let err = orders::checkout(
        &pool,
        &cart,
        "s3",
        user_id,
        "45 Sample Avenue, Shelbyville",
        Some("NO-SUCH-CODE"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Invalid(_)));

    // Cart survives a failed checkout
    assert_eq!(cart.items("s3").len(), 1);
}

#[tokio::test]
async fn vanished_products_are_skipped_best_effort() {
    let (_dir, pool) = setup().await;
    let keep_id = seed_product(&pool, "Notebook", "notebook", 200).await;
    let gone_id = seed_product(&pool, "Discontinued", "discontinued", 300).await;
    let user_id = seed_user(&pool, "09120000004").await;

    let cart = CartStore::new();
    cart.add("s4", orders::snapshot_line(&pool, keep_id, 1, None).await.unwrap());
    cart.add("s4", orders::snapshot_line(&pool, gone_id, 1, None).await.unwrap());

    product::delete(&pool, gone_id).await.unwrap();

    let result = orders::checkout(&pool, &cart, "s4", user_id, "9 Backorder Road, Ogdenville", None)
        .await
        .unwrap();

    assert_eq!(result.skipped_product_ids, vec![gone_id]);
    assert_eq!(result.total_price, 200);

    let lines = order::find_lines(&pool, result.order.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, keep_id);
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let (_dir, pool) = setup().await;
    let user_id = seed_user(&pool, "09120000005").await;

    let cart = CartStore::new();
    let err = orders::checkout(&pool, &cart, "s5", user_id, "1 Nowhere Lane, North Haverbrook", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn status_graph_is_enforced() {
    let (_dir, pool) = setup().await;
    let product_id = seed_product(&pool, "Charger", "charger", 400).await;
    let user_id = seed_user(&pool, "09120000006").await;

    let cart = CartStore::new();
    cart.add("s6", orders::snapshot_line(&pool, product_id, 1, None).await.unwrap());
    let result = orders::checkout(&pool, &cart, "s6", user_id, "7 Delivery Drive, Capital City", None)
        .await
        .unwrap();
    let order_id = result.order.id;

    // Pending -> Shipped skips Processing and must fail
    let err = orders::advance_status(&pool, order_id, OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let updated = orders::advance_status(&pool, order_id, OrderStatus::Processing)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Processing);

    // Cancellation is a pending-only transition
    let err = orders::cancel(&pool, order_id, user_id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let updated = orders::advance_status(&pool, order_id, OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
    let updated = orders::advance_status(&pool, order_id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Delivered);
    assert!(updated.status.is_terminal());
}

#[tokio::test]
async fn cancel_checks_ownership() {
    let (_dir, pool) = setup().await;
    let product_id = seed_product(&pool, "Cable", "cable", 100).await;
    let owner = seed_user(&pool, "09120000007").await;
    let stranger = seed_user(&pool, "09120000008").await;

    let cart = CartStore::new();
    cart.add("s7", orders::snapshot_line(&pool, product_id, 1, None).await.unwrap());
    let result = orders::checkout(&pool, &cart, "s7", owner, "3 Ownership Court, Brockway", None)
        .await
        .unwrap();

    let err = orders::cancel(&pool, result.order.id, stranger).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let cancelled = orders::cancel(&pool, result.order.id, owner).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}
