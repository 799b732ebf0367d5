//! Random test data. Values look plausible but are not meant to be unique
//! across runs.

use rand::seq::SliceRandom;
use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::str::FromStr;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "Hedy", "John",
    "Katherine", "Linus", "Margaret", "Niklaus", "Radia", "Tim",
];
const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Dijkstra", "Hamilton", "Hopper", "Johnson", "Kernighan", "Knuth",
    "Lamarr", "Liskov", "Lovelace", "Perlman", "Ritchie", "Thompson", "Turing", "Wirth",
];
const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "test.dev"];
const STREETS: &[&str] = &["Main St", "Oak Ave", "Pine Rd", "Maple Dr", "Cedar Ln", "Elm St"];
const CITIES: &[&str] = &["Springfield", "Riverside", "Fairview", "Greenville", "Madison", "Georgetown"];
const STATES: &[&str] = &["CA", "NY", "TX", "WA", "OR", "IL", "MA", "CO"];
const COUNTRIES: &[&str] = &["United States", "Canada", "Germany", "Japan", "Brazil", "Australia"];
const COMPANIES: &[&str] = &["Acme Corp", "Globex", "Initech", "Umbrella", "Hooli", "Stark Industries"];
const JOBS: &[&str] = &["Engineer", "Designer", "Analyst", "Manager", "Consultant", "Technician"];
const WORDS: &[&str] = &[
    "lamp", "chair", "widget", "gadget", "notebook", "kettle", "backpack", "speaker", "monitor",
    "blanket",
];
const PRODUCT_CATEGORIES: &[&str] = &["Electronics", "Clothing", "Food", "Books"];
const ORDER_STATUSES: &[&str] = &["pending", "processing", "shipped", "delivered"];

fn pick(items: &'static [&'static str]) -> &'static str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

/// ASCII letters and digits
pub fn random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub fn random_name() -> String {
    format!("{} {}", pick(FIRST_NAMES), pick(LAST_NAMES))
}

pub fn random_email() -> String {
    format!(
        "{}.{}@{}",
        pick(FIRST_NAMES).to_lowercase(),
        random_string(6).to_lowercase(),
        pick(EMAIL_DOMAINS)
    )
}

/// North American format, `555-XXX-XXXX`
pub fn random_phone() -> String {
    let mut rng = rand::thread_rng();
    format!("555-{:03}-{:04}", rng.gen_range(100..1000), rng.gen_range(0..10000))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

pub fn random_address() -> Address {
    let mut rng = rand::thread_rng();
    Address {
        street: format!("{} {}", rng.gen_range(1..10000), pick(STREETS)),
        city: pick(CITIES).to_string(),
        state: pick(STATES).to_string(),
        zip: format!("{:05}", rng.gen_range(10000..100000)),
        country: pick(COUNTRIES).to_string(),
    }
}

/// Payload shapes produced by [`generate_test_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    User,
    Product,
    Order,
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(DataKind::User),
            "product" => Ok(DataKind::Product),
            "order" => Ok(DataKind::Order),
            other => Err(format!("Unknown data kind: {}", other)),
        }
    }
}

fn price(rng: &mut impl Rng, low: f64, high: f64) -> f64 {
    (rng.gen_range(low..high) * 100.0).round() / 100.0
}

pub fn generate_test_data(kind: DataKind) -> JsonValue {
    let mut rng = rand::thread_rng();
    match kind {
        DataKind::User => {
            let address = random_address();
            json!({
                "name": random_name(),
                "email": random_email(),
                "phone": random_phone(),
                "address": format!("{}, {}, {} {}", address.street, address.city, address.state, address.zip),
                "company": pick(COMPANIES),
                "job": pick(JOBS),
            })
        }
        DataKind::Product => {
            let word = pick(WORDS);
            let mut name = word.to_string();
            if let Some(first) = name.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            json!({
                "name": name,
                "description": format!("A dependable {} for everyday use.", word),
                "price": price(&mut rng, 10.0, 1000.0),
                "category": pick(PRODUCT_CATEGORIES),
                "stock": rng.gen_range(0..=100),
                "sku": random_string(8).to_uppercase(),
            })
        }
        DataKind::Order => {
            let days_ago = rng.gen_range(0..365);
            let order_date = chrono::Utc::now() - chrono::Duration::days(days_ago);
            json!({
                "order_id": random_string(12).to_uppercase(),
                "customer_name": random_name(),
                "total": price(&mut rng, 20.0, 500.0),
                "status": pick(ORDER_STATUSES),
                "order_date": order_date.to_rfc3339(),
                "items_count": rng.gen_range(1..=5),
            })
        }
    }
}

/// Like [`generate_test_data`] with the kind given by name; unknown names
/// yield an empty object
pub fn generate_test_data_named(kind: &str) -> JsonValue {
    match kind.parse::<DataKind>() {
        Ok(kind) => generate_test_data(kind),
        Err(_) => json!({}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_string() {
        let s = random_string(16);
        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(random_string(0).is_empty());
    }

    #[test]
    fn test_random_contact_details() {
        let email = random_email();
        let (local, domain) = email.split_once('@').unwrap();
        assert!(!local.is_empty());
        assert!(EMAIL_DOMAINS.contains(&domain));

        let phone = random_phone();
        assert_eq!(phone.len(), 12);
        assert!(phone.starts_with("555-"));

        assert_eq!(random_name().split(' ').count(), 2);
        assert_eq!(random_address().zip.len(), 5);
    }

    #[test]
    fn test_generated_shapes() {
        let user = generate_test_data(DataKind::User);
        for key in ["name", "email", "phone", "address", "company", "job"] {
            assert!(user.get(key).is_some(), "user missing {}", key);
        }

        let product = generate_test_data(DataKind::Product);
        let price = product["price"].as_f64().unwrap();
        assert!((10.0..=1000.0).contains(&price));
        assert!(product["stock"].as_u64().unwrap() <= 100);
        assert_eq!(product["sku"].as_str().unwrap().len(), 8);
        assert!(PRODUCT_CATEGORIES.contains(&product["category"].as_str().unwrap()));

        let order = generate_test_data(DataKind::Order);
        let items = order["items_count"].as_u64().unwrap();
        assert!((1..=5).contains(&items));
        assert!(ORDER_STATUSES.contains(&order["status"].as_str().unwrap()));
    }

    #[test]
    fn test_named_kinds() {
        assert!(generate_test_data_named("PRODUCT").get("sku").is_some());
        assert_eq!(generate_test_data_named("invoice"), json!({}));
    }
}
