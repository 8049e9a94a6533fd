use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use peakkart::domain::click::NewClickEvent;
use peakkart::domain::product::NewProduct;
use peakkart::domain::types::{
    AffiliateLink, CategoryName, ImageSource, ProductId, ProductPrice, ProductRating,
    ProductTitle,
};
use peakkart::repository::{
    ClickReader, ClickWriter, DieselRepository, ProductListQuery, ProductReader, ProductWriter,
    RepositoryError,
};
use peakkart::schema::products;

mod common;

fn new_product(title: &str, category: &str, price: f64) -> NewProduct {
    NewProduct {
        title: ProductTitle::new(title).expect("valid title"),
        price: ProductPrice::new(price).expect("valid price"),
        image_url: ImageSource::new("http://x/1.jpg").expect("valid image"),
        category: CategoryName::new(category).expect("valid category"),
        affiliate_link: AffiliateLink::new("http://x").expect("valid link"),
        rating: None,
    }
}

#[test]
fn create_product_returns_stored_record() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut product = new_product("Test", "New Gear", 199.99);
    product.rating = Some(ProductRating::new(4.5).unwrap());

    let created = repo
        .create_product(&product)
        .expect("should create product");
    assert!(!created.id.is_empty());
    assert_eq!(created.title.as_str(), "Test");
    assert_eq!(created.price, 199.99);
    assert_eq!(created.rating.map(ProductRating::get), Some(4.5));

    let loaded = repo
        .get_product_by_id(&created.id)
        .expect("should query product")
        .expect("product should exist");
    assert_eq!(loaded.id, created.id);

    let missing = repo
        .get_product_by_id(&ProductId::new("missing").unwrap())
        .expect("should query product");
    assert!(missing.is_none());
}

#[test]
fn new_category_appears_exactly_once_sorted() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(&new_product("Phone", "Mobiles", 10.0))
        .unwrap();
    repo.create_product(&new_product("Kettle", "Kitchen", 10.0))
        .unwrap();
    repo.create_product(&new_product("Test", "New Gear", 199.99))
        .unwrap();
    repo.create_product(&new_product("Tent", "New Gear", 99.0))
        .unwrap();

    let categories: Vec<String> = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(CategoryName::into_inner)
        .collect();

    assert_eq!(categories, ["Kitchen", "Mobiles", "New Gear"]);
}

#[test]
fn list_products_orders_newest_first_and_filters_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let mut conn = test_db.pool().get().unwrap();

    for (id, category, created_at) in [
        ("a", "Mobiles", "2026-03-01 10:00:00"),
        ("b", "Kitchen", "2026-03-02 10:00:00"),
        ("c", "Mobiles", "2026-03-03 10:00:00"),
    ] {
        diesel::insert_into(products::table)
            .values((
                products::id.eq(id),
                products::title.eq(format!("Item {id}")),
                products::price.eq(10.0_f64),
                products::image_url.eq("http://x/1.jpg"),
                products::category.eq(category),
                products::affiliate_link.eq("http://x"),
                products::created_at.eq(chrono::NaiveDateTime::parse_from_str(
                    created_at,
                    "%Y-%m-%d %H:%M:%S",
                )
                .unwrap()),
            ))
            .execute(&mut conn)
            .expect("should insert product");
    }

    let all: Vec<String> = repo
        .list_products(ProductListQuery::default())
        .unwrap()
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(all, ["c", "b", "a"]);

    let mobiles: Vec<String> = repo
        .list_products(ProductListQuery::default().category("Mobiles"))
        .unwrap()
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(mobiles, ["c", "a"]);
}

#[test]
fn rows_violating_domain_constraints_are_skipped() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let mut conn = test_db.pool().get().unwrap();

    repo.create_product(&new_product("Good", "Mobiles", 10.0))
        .unwrap();
    diesel::insert_into(products::table)
        .values((
            products::id.eq("bad"),
            products::title.eq("Bad"),
            products::price.eq(-1.0_f64),
            products::image_url.eq("http://x/1.jpg"),
            products::category.eq("Mobiles"),
            products::affiliate_link.eq("http://x"),
        ))
        .execute(&mut conn)
        .expect("should insert product");

    let products = repo.list_products(ProductListQuery::default()).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title.as_str(), "Good");
}

#[test]
fn clicks_are_counted_per_product() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let phone = repo
        .create_product(&new_product("Phone", "Mobiles", 10.0))
        .unwrap();
    let kettle = repo
        .create_product(&new_product("Kettle", "Kitchen", 10.0))
        .unwrap();

    for (product, times) in [(&phone, 3), (&kettle, 1)] {
        for _ in 0..times {
            repo.record_click(&NewClickEvent {
                product_id: product.id.clone(),
                user_agent: "Mozilla/5.0".to_string(),
            })
            .expect("should record click");
        }
    }

    let mut counts: Vec<(String, u64)> = repo
        .count_clicks_by_product()
        .expect("should count clicks")
        .into_iter()
        .map(|count| (count.product_id.into_inner(), count.total_clicks))
        .collect();
    counts.sort();

    let mut expected = vec![
        (phone.id.into_inner(), 3),
        (kettle.id.into_inner(), 1),
    ];
    expected.sort();
    assert_eq!(counts, expected);
}

#[test]
fn read_only_store_reports_permission_denied() {
    let test_db = common::TestDb::new();
    let pool = Pool::builder()
        .max_size(1)
        .build(ConnectionManager::<SqliteConnection>::new(test_db.path()))
        .expect("should build pool");

    {
        let mut conn = pool.get().unwrap();
        diesel::sql_query("PRAGMA query_only = ON")
            .execute(&mut conn)
            .expect("should switch connection to read-only");
    }

    let repo = DieselRepository::new(pool);
    let result = repo.create_product(&new_product("Test", "New Gear", 199.99));
    assert!(
        matches!(result, Err(RepositoryError::PermissionDenied(_))),
        "unexpected result: {result:?}"
    );
}
