//! Repository behavior over a temporary database

use store_server::db::DbService;
use store_server::db::repository::{
    RepoError, blog, brand, comment, coupon, otp, product, search, user, wishlist,
};

use shared::models::{ArticleCreate, BrandCreate, CommentCreate, CouponCreate, ProductCreate};
use sqlx::SqlitePool;

async fn setup() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    (dir, db.pool)
}

fn product_payload(title: &str, slug: &str, price: i64) -> ProductCreate {
    ProductCreate {
        title: title.to_string(),
        slug: slug.to_string(),
        brand_id: None,
        price,
        description: None,
        image: None,
        is_drive: None,
        category_ids: vec![],
    }
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let (_dir, pool) = setup().await;
    product::create(&pool, product_payload("First", "same-slug", 100))
        .await
        .unwrap();
    let err = product::create(&pool, product_payload("Second", "same-slug", 200))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn soft_deleted_products_disappear_from_listings() {
    let (_dir, pool) = setup().await;
    let id = product::create(&pool, product_payload("Gone Soon", "gone-soon", 100))
        .await
        .unwrap()
        .id;

    assert_eq!(product::find_all(&pool).await.unwrap().len(), 1);
    assert!(product::delete(&pool, id).await.unwrap());
    assert!(product::find_all(&pool).await.unwrap().is_empty());

    // Still reachable by id for order history joins
    let row = product::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(!row.is_active);

    // Second delete is a no-op
    assert!(!product::delete(&pool, id).await.unwrap());
}

#[tokio::test]
async fn view_counter_increments() {
    let (_dir, pool) = setup().await;
    let id = product::create(&pool, product_payload("Popular", "popular", 100))
        .await
        .unwrap()
        .id;

    product::increment_view_count(&pool, id).await.unwrap();
    product::increment_view_count(&pool, id).await.unwrap();

    let row = product::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.view_count, 2);
}

#[tokio::test]
async fn drive_catalog_filters_by_flag_and_relates_by_brand() {
    let (_dir, pool) = setup().await;
    let brand_id = brand::create(
        &pool,
        BrandCreate {
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            image: None,
        },
    )
    .await
    .unwrap()
    .id;

    let mut drive_a = product_payload("Printer Driver", "printer-driver", 0);
    drive_a.is_drive = Some(true);
    drive_a.brand_id = Some(brand_id);
    let drive_a = product::create(&pool, drive_a).await.unwrap();

    let mut drive_b = product_payload("Scanner Driver", "scanner-driver", 0);
    drive_b.is_drive = Some(true);
    drive_b.brand_id = Some(brand_id);
    let drive_b = product::create(&pool, drive_b).await.unwrap();

    // Plain products never show up in the drive catalog
    product::create(&pool, product_payload("Printer", "printer", 900))
        .await
        .unwrap();

    let drives = product::find_drives(&pool).await.unwrap();
    assert_eq!(drives.len(), 2);

    let found = product::find_drive_by_slug(&pool, "printer-driver")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, drive_a.id);

    // Slug lookup is drive-only
    assert!(
        product::find_drive_by_slug(&pool, "printer")
            .await
            .unwrap()
            .is_none()
    );

    let related = product::find_related_drives(&pool, brand_id, drive_a.id, 8)
        .await
        .unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, drive_b.id);
}

#[tokio::test]
async fn find_or_create_by_phone_is_idempotent() {
    let (_dir, pool) = setup().await;
    let first = user::find_or_create_by_phone(&pool, "09123334444").await.unwrap();
    let second = user::find_or_create_by_phone(&pool, "09123334444").await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.role, "customer");
}

#[tokio::test]
async fn otp_codes_are_single_use_and_superseded() {
    let (_dir, pool) = setup().await;
    let expires = shared::util::now_millis() + 120_000;

    otp::store_code(&pool, "0912555", "11111", expires).await.unwrap();
    otp::store_code(&pool, "0912555", "22222", expires).await.unwrap();

    // Only the latest code is live
    let active = otp::find_active(&pool, "0912555").await.unwrap().unwrap();
    assert_eq!(active.code, "22222");

    assert!(otp::consume(&pool, active.id).await.unwrap());
    assert!(otp::find_active(&pool, "0912555").await.unwrap().is_none());

    // Consuming twice fails
    assert!(!otp::consume(&pool, active.id).await.unwrap());
}

#[tokio::test]
async fn expired_otp_codes_are_rejected() {
    let (_dir, pool) = setup().await;
    let past = shared::util::now_millis() - 1_000;
    otp::store_code(&pool, "0912999", "54321", past).await.unwrap();

    // The stored row is still the latest unconsumed one, but its window
    // has closed
    assert!(otp::find_active(&pool, "0912999").await.unwrap().is_some());

    let err = store_server::auth::otp::verify(&pool, "0912999", "54321")
        .await
        .unwrap_err();
    assert!(matches!(err, store_server::utils::AppError::Invalid(_)));
}

#[tokio::test]
async fn wishlist_toggle_flips_membership() {
    let (_dir, pool) = setup().await;
    let user_id = user::find_or_create_by_phone(&pool, "0912666").await.unwrap().id;
    let product_id = product::create(&pool, product_payload("Wanted", "wanted", 100))
        .await
        .unwrap()
        .id;

    assert!(wishlist::toggle(&pool, user_id, product_id).await.unwrap());
    assert!(wishlist::contains(&pool, user_id, product_id).await.unwrap());
    assert_eq!(wishlist::find_by_user(&pool, user_id).await.unwrap().len(), 1);

    assert!(!wishlist::toggle(&pool, user_id, product_id).await.unwrap());
    assert!(!wishlist::contains(&pool, user_id, product_id).await.unwrap());
}

#[tokio::test]
async fn comment_rating_bounds_and_average() {
    let (_dir, pool) = setup().await;
    let user_id = user::find_or_create_by_phone(&pool, "0912777").await.unwrap().id;
    let product_id = product::create(&pool, product_payload("Rated", "rated", 100))
        .await
        .unwrap()
        .id;

    let err = comment::create(
        &pool,
        user_id,
        CommentCreate {
            product_id,
            parent_id: None,
            text: "off the scale".to_string(),
            rating: 6,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    for rating in [4, 5] {
        comment::create(
            &pool,
            user_id,
            CommentCreate {
                product_id,
                parent_id: None,
                text: format!("{} stars", rating),
                rating,
            },
        )
        .await
        .unwrap();
    }

    let avg = comment::average_rating(&pool, product_id).await.unwrap().unwrap();
    assert!((avg - 4.5).abs() < f64::EPSILON);

    let listed = comment::find_by_product(&pool, product_id).await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn comment_votes_toggle_and_flip_per_user() {
    let (_dir, pool) = setup().await;
    let author = user::find_or_create_by_phone(&pool, "0912888").await.unwrap().id;
    let voter = user::find_or_create_by_phone(&pool, "0912889").await.unwrap().id;
    let other = user::find_or_create_by_phone(&pool, "0912890").await.unwrap().id;
    let product_id = product::create(&pool, product_payload("Voted", "voted", 100))
        .await
        .unwrap()
        .id;
    let comment_id = comment::create(
        &pool,
        author,
        CommentCreate {
            product_id,
            parent_id: None,
            text: "solid".to_string(),
            rating: 5,
        },
    )
    .await
    .unwrap()
    .id;

    // First like registers
    let s = comment::vote(&pool, comment_id, voter, true).await.unwrap();
    assert_eq!((s.like_count, s.dislike_count, s.voted), (1, 0, Some(true)));

    // Repeating the same vote withdraws it, never double-counts
    let s = comment::vote(&pool, comment_id, voter, true).await.unwrap();
    assert_eq!((s.like_count, s.dislike_count, s.voted), (0, 0, None));

    // Dislike then like flips the standing vote
    let s = comment::vote(&pool, comment_id, voter, false).await.unwrap();
    assert_eq!((s.like_count, s.dislike_count, s.voted), (0, 1, Some(false)));
    let s = comment::vote(&pool, comment_id, voter, true).await.unwrap();
    assert_eq!((s.like_count, s.dislike_count, s.voted), (1, 0, Some(true)));

    // Votes are per-user
    let s = comment::vote(&pool, comment_id, other, true).await.unwrap();
    assert_eq!(s.like_count, 2);

    // Voting on a hidden comment fails
    comment::deactivate(&pool, comment_id).await.unwrap();
    let err = comment::vote(&pool, comment_id, voter, true).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn popular_search_counts_and_suggestions() {
    let (_dir, pool) = setup().await;

    for _ in 0..3 {
        search::bump_popular(&pool, "keyboard").await.unwrap();
    }
    search::bump_popular(&pool, "kettle").await.unwrap();
    search::log_search(&pool, None, Some("guest-1"), "keyboard").await.unwrap();

    let suggestions = search::suggest(&pool, "ke", 8).await.unwrap();
    assert_eq!(suggestions.len(), 2);
    // Highest count first
    assert_eq!(suggestions[0].query, "keyboard");
    assert_eq!(suggestions[0].count, 3);

    let top = search::top_popular(&pool, 1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].query, "keyboard");
}

#[tokio::test]
async fn coupon_validity_window() {
    let (_dir, pool) = setup().await;
    let now = shared::util::now_millis();

    coupon::create(
        &pool,
        CouponCreate {
            code: "EXPIRED".to_string(),
            discount: 20,
            start_at: now - 10_000,
            end_at: now - 5_000,
        },
    )
    .await
    .unwrap();

    let found = coupon::find_by_code(&pool, "EXPIRED").await.unwrap().unwrap();
    assert!(!found.is_valid_at(now));
    assert!(found.is_valid_at(now - 7_000));

    // Codes are unique
    let err = coupon::create(
        &pool,
        CouponCreate {
            code: "EXPIRED".to_string(),
            discount: 10,
            start_at: now,
            end_at: now + 1_000,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn deleted_coupons_stop_validating_but_keep_their_row() {
    let (_dir, pool) = setup().await;
    let now = shared::util::now_millis();

    let created = coupon::create(
        &pool,
        CouponCreate {
            code: "SPRING".to_string(),
            discount: 15,
            start_at: now - 1_000,
            end_at: now + 3_600_000,
        },
    )
    .await
    .unwrap();

    assert!(coupon::delete(&pool, created.id).await.unwrap());

    // Row survives for order history, but no longer validates
    let found = coupon::find_by_code(&pool, "SPRING").await.unwrap().unwrap();
    assert!(!found.is_active);
    assert!(!found.is_valid_at(now));

    // Second delete is a no-op
    assert!(!coupon::delete(&pool, created.id).await.unwrap());
}

#[tokio::test]
async fn article_views_count_and_slug_lookup() {
    let (_dir, pool) = setup().await;
    let created = blog::create(
        &pool,
        ArticleCreate {
            title: "Choosing a keyboard".to_string(),
            slug: "choosing-a-keyboard".to_string(),
            body: "Switches matter.".to_string(),
            image: None,
        },
    )
    .await
    .unwrap();

    blog::increment_view_count(&pool, created.id).await.unwrap();
    let found = blog::find_by_slug(&pool, "choosing-a-keyboard")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.view_count, 1);
}
