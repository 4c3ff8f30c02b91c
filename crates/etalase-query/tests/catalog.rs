//! Repository → query pipeline over a generated catalog.

use etalase_content::{Article, ContentRepository, Product};
use etalase_query::{categories, query, QueryOptions, SortOrder};
use tempfile::TempDir;
use tokio::fs;

async fn catalog(count: usize) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("products");
    fs::create_dir_all(&dir).await.unwrap();

    for i in 0..count {
        let category = if i % 3 == 0 { "topi" } else { "kaos" };
        let contents = format!(
            "---\nname: Produk {i:02}\ncategory: {category}\nprice: \"Rp {}.000\"\nrating: {}\n---\n",
            100 - i,
            (i % 5) as f64 / 2.0,
        );
        fs::write(dir.join(format!("produk-{i:02}.md")), contents)
            .await
            .unwrap();
    }
    temp
}

#[tokio::test]
async fn paginates_loaded_products() {
    let temp = catalog(25).await;
    let repo = ContentRepository::new(temp.path());
    let products: Vec<Product> = repo.load_records().await.unwrap();

    let options = QueryOptions::new().with_page_size(9).with_page(3);
    let result = query(&products, &options);

    assert_eq!(result.total_count, 25);
    assert_eq!(result.total_pages, 3);
    assert_eq!(result.items.len(), 7);
    assert_eq!(result.items[0].name, "Produk 18");
    assert_eq!(result.items[6].name, "Produk 24");
}

#[tokio::test]
async fn category_filter_then_price_sort() {
    let temp = catalog(25).await;
    let repo = ContentRepository::new(temp.path());
    let products: Vec<Product> = repo.load_records().await.unwrap();

    let options = QueryOptions::new()
        .with_category("topi")
        .with_sort(SortOrder::PriceAsc)
        .with_page_size(100);
    let result = query(&products, &options);

    assert_eq!(result.total_count, 9);
    assert!(result.items.iter().all(|p| p.category == "topi"));
    assert!(result.items.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(result.items[0].price, 76000);
}

#[tokio::test]
async fn unknown_sort_uses_name_order() {
    let temp = catalog(4).await;
    let repo = ContentRepository::new(temp.path());
    let products: Vec<Product> = repo.load_records().await.unwrap();

    let options = QueryOptions::new().with_sort_name("terlaris");
    let result = query(&products, &options);
    let names: Vec<_> = result.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Produk 00", "Produk 01", "Produk 02", "Produk 03"]);
}

#[tokio::test]
async fn category_counts() {
    let temp = catalog(6).await;
    let repo = ContentRepository::new(temp.path());
    let products: Vec<Product> = repo.load_records().await.unwrap();

    let counts = categories(&products);
    assert_eq!(counts.len(), 2);
    assert_eq!((counts[0].name.as_str(), counts[0].count), ("topi", 2));
    assert_eq!((counts[1].name.as_str(), counts[1].count), ("kaos", 4));
}

#[tokio::test]
async fn articles_without_content_query_empty() {
    let temp = TempDir::new().unwrap();
    let repo = ContentRepository::new(temp.path());
    let articles: Vec<Article> = repo.load_records().await.unwrap();

    let result = query(&articles, &QueryOptions::new());
    assert!(result.items.is_empty());
    assert_eq!(result.total_pages, 0);
}
