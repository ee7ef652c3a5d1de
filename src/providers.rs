//! Service provider display model and row shaping

use serde_json::Value;

use crate::types::ProviderRow;

pub const DEFAULT_LANGUAGE: &str = "English";
pub const MAX_RATING: f64 = 5.0;
const DEFAULT_RESPONSE_MINUTES: i64 = 60;

const LANDSCAPER_IMAGE: &str = "/assets/landscaper-trevor.jpg";
const ELECTRICIAN_IMAGE: &str = "/assets/electrician-mark.jpg";
const PLUMBER_IMAGE: &str = "/assets/plumber-ryan.jpg";
const PET_SITTER_IMAGE: &str = "/assets/pet-sitter-amanda.jpg";

/// A service professional as shown in the home feed and detail view
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceProvider {
    pub id: String,
    pub name: String,
    pub service: String,
    /// 0 to 5, fractional
    pub rating: f64,
    pub review_count: u32,
    pub location: String,
    /// Formatted hourly rate, e.g. `$60/hour`
    pub price: String,
    pub image_url: String,
    pub is_available: bool,
    pub tags: Vec<String>,
    pub description: String,
    pub specialties: Vec<String>,
    pub years_in_business: u32,
    pub languages: Vec<String>,
    pub background_checked: bool,
    pub response_time: String,
}

impl ServiceProvider {
    pub fn from_row(row: ProviderRow) -> Self {
        let service = row.service_category.unwrap_or_default();
        let image_url = row
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder_image(&service).to_string());
        let specialties = row.specialties.unwrap_or_default();
        let response_minutes = row
            .response_time_minutes
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_RESPONSE_MINUTES);

        Self {
            id: row.id.map(id_string).unwrap_or_default(),
            name: row.business_name.unwrap_or_default(),
            rating: row.rating.unwrap_or(0.0).clamp(0.0, MAX_RATING),
            review_count: clamp_count(row.review_count),
            location: row.location_address.unwrap_or_default(),
            price: format_hourly_rate(row.hourly_rate.unwrap_or(0.0)),
            image_url,
            is_available: row.is_available.unwrap_or(false),
            tags: specialties.clone(),
            description: row.description.unwrap_or_default(),
            specialties,
            years_in_business: clamp_count(row.years_experience),
            languages: row
                .languages
                .unwrap_or_else(|| vec![DEFAULT_LANGUAGE.to_string()]),
            background_checked: row.background_checked.unwrap_or(false),
            response_time: format!("< {} min", response_minutes),
            service,
        }
    }

    /// Whether star `n` (1-based) of the 5-star indicator is filled.
    pub fn star_filled(&self, n: u8) -> bool {
        f64::from(n) <= self.rating
    }

    pub fn filled_stars(&self) -> usize {
        (1..=5).filter(|n| self.star_filled(*n)).count()
    }

    /// Case-insensitive match against name, service, location and tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [&self.name, &self.service, &self.location]
            .into_iter()
            .chain(self.tags.iter())
            .any(|field| field.to_lowercase().contains(&query))
    }
}

fn id_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn clamp_count(value: Option<i64>) -> u32 {
    value
        .unwrap_or(0)
        .clamp(0, i64::from(u32::MAX))
        .try_into()
        .unwrap_or(0)
}

/// `$60/hour`, `$62.5/hour`. Negative rates are shown as zero.
pub fn format_hourly_rate(rate: f64) -> String {
    let rate = if rate.is_finite() && rate > 0.0 { rate } else { 0.0 };
    if rate.fract() == 0.0 {
        format!("${:.0}/hour", rate)
    } else {
        format!("${}/hour", rate)
    }
}

/// Stock image for a category until providers upload their own.
pub fn placeholder_image(category: &str) -> &'static str {
    let category = category.to_lowercase();
    if category.contains("electric") {
        ELECTRICIAN_IMAGE
    } else if category.contains("plumb") {
        PLUMBER_IMAGE
    } else if category.contains("pet") || category.contains("dog") {
        PET_SITTER_IMAGE
    } else {
        LANDSCAPER_IMAGE
    }
}

/// Shape raw rows in backend order. Rows that are not objects, or whose
/// fields have the wrong type, are dropped.
pub fn shape_rows(rows: Vec<Value>) -> Vec<ServiceProvider> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            if !row.is_object() {
                tracing::warn!("Skipping provider row {}: not an object", index);
                return None;
            }
            match serde_json::from_value::<ProviderRow>(row) {
                Ok(row) => Some(ServiceProvider::from_row(row)),
                Err(e) => {
                    tracing::warn!("Skipping provider row {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Providers visible for a search query, preserving order.
pub fn filter_providers(providers: &[ServiceProvider], query: &str) -> Vec<ServiceProvider> {
    providers
        .iter()
        .filter(|p| p.matches(query))
        .cloned()
        .collect()
}

/// Shortcut shown under "Featured Selections"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCategory {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const SERVICE_CATEGORIES: [ServiceCategory; 4] = [
    ServiceCategory { name: "House Cleaning", icon: "🏠" },
    ServiceCategory { name: "Landscaping", icon: "🌿" },
    ServiceCategory { name: "Electrical Installations", icon: "⚡" },
    ServiceCategory { name: "Tutoring", icon: "📚" },
];

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    service: &str,
    rating: f64,
    review_count: u32,
    location: &str,
    price: &str,
    image_url: &str,
    tags: &[&str],
    description: &str,
    specialties: &[&str],
    years_in_business: u32,
    languages: &[&str],
    response_time: &str,
) -> ServiceProvider {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    ServiceProvider {
        id: id.to_string(),
        name: name.to_string(),
        service: service.to_string(),
        rating,
        review_count,
        location: location.to_string(),
        price: price.to_string(),
        image_url: image_url.to_string(),
        is_available: true,
        tags: owned(tags),
        description: description.to_string(),
        specialties: owned(specialties),
        years_in_business,
        languages: owned(languages),
        background_checked: true,
        response_time: response_time.to_string(),
    }
}

/// Built-in listings shown when the provider fetch fails.
pub fn sample_providers() -> Vec<ServiceProvider> {
    vec![
        sample(
            "1",
            "Trevor T.",
            "Landscaping Service",
            5.0,
            12,
            "Poway, CA",
            "$60/hour",
            LANDSCAPER_IMAGE,
            &["Lawn Repair", "Soil Amendment", "Garden Design"],
            "Hello, I'm Trevor! With 7 years of landscaping expertise, I focus on sustainable and beautiful landscape solutions, from native plant gardens to efficient irrigation systems.",
            &["Lawn Repair", "Soil Amendment", "Garden Design"],
            7,
            &["English"],
            "< 30 min",
        ),
        sample(
            "2",
            "Mark Y.",
            "Electrician Service",
            5.0,
            35,
            "San Diego, CA",
            "$110/hour",
            ELECTRICIAN_IMAGE,
            &["Repairs", "Inspections", "Installations"],
            "I'm Mark, with 10 years in the field, I specialize in residential and commercial electrical services, focusing on reliability and customer satisfaction.",
            &["Repairs", "Inspections", "Installations"],
            10,
            &["English", "Spanish"],
            "< 45 min",
        ),
        sample(
            "3",
            "Ryan B.",
            "Plumbing Services",
            4.8,
            28,
            "Temecula, CA",
            "$85/hour",
            PLUMBER_IMAGE,
            &["Emergency Repair", "Installation", "Maintenance"],
            "Professional plumber with 8+ years experience. Available for emergency repairs, installations, and maintenance work.",
            &["Emergency Repair", "Installation", "Maintenance"],
            8,
            &["English"],
            "< 60 min",
        ),
        sample(
            "4",
            "Amanda N.",
            "Dog Sitting Service",
            4.9,
            42,
            "El Ranch, CA",
            "$25/hour",
            PET_SITTER_IMAGE,
            &["Pet Care", "Walking", "Overnight"],
            "Loving pet sitter with experience caring for dogs of all sizes. Your furry friend will be in great hands!",
            &["Pet Care", "Walking", "Overnight Care"],
            3,
            &["English"],
            "< 20 min",
        ),
    ]
}
