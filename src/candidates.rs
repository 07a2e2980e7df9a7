use crate::api::{ListingQueueItem, SeekerQueueItem};
use crate::deck::Identified;

const PLACEHOLDER_PHOTO: &str = "/placeholder-house.jpg";
const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq)]
pub struct RoommateSummary {
    pub name: String,
    pub major: Option<String>,
    pub pronouns: Option<String>,
    pub sleeping_habits: Option<String>,
    pub interests: Vec<String>,
    pub photo: Option<String>,
}

/// One entry in a swipe queue, normalized so the deck and the card views do
/// not care whether it came from a listing or a seeker profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeCandidate {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub city: Option<String>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
    pub rent_min: Option<f64>,
    pub rent_max: Option<f64>,
    pub field_of_study: String,
    pub interests: Vec<String>,
    pub photos: Vec<String>,
    pub roommates: Vec<RoommateSummary>,
}

impl Identified for SwipeCandidate {
    fn id(&self) -> &str {
        &self.id
    }
}

impl SwipeCandidate {
    pub fn rent_label(&self) -> String {
        match (self.rent_min, self.rent_max) {
            (Some(min), Some(max)) if min == max => format!("{}/mo", format_usd(min)),
            (Some(min), Some(max)) => format!("{} - {}/mo", format_usd(min), format_usd(max)),
            (Some(only), None) | (None, Some(only)) => format!("{}/mo", format_usd(only)),
            (None, None) => NOT_SPECIFIED.to_owned(),
        }
    }

    pub fn availability_label(&self) -> Option<String> {
        match (self.available_from.as_deref(), self.available_to.as_deref()) {
            (Some(from), Some(to)) => Some(format!("{from} - {to}")),
            (Some(from), None) => Some(format!("From {from}")),
            (None, Some(to)) => Some(format!("Until {to}")),
            (None, None) => None,
        }
    }
}

pub fn from_listing(item: ListingQueueItem) -> SwipeCandidate {
    let rent = parse_money(item.price_per_month.as_deref());

    let roommates: Vec<RoommateSummary> = item
        .roommates
        .into_iter()
        .map(|roommate| RoommateSummary {
            name: roommate.name.unwrap_or_else(|| "Roommate".to_owned()),
            major: roommate.major,
            pronouns: roommate.pronouns,
            sleeping_habits: roommate.sleeping_habits,
            interests: roommate.interests,
            photo: roommate.photo_url,
        })
        .collect();

    SwipeCandidate {
        id: item.id,
        name: item
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| "Untitled Listing".to_owned()),
        bio: item.bio.unwrap_or_default(),
        city: item.city,
        available_from: item.available_from,
        available_to: item.available_to,
        rent_min: rent,
        rent_max: rent,
        field_of_study: joined_majors(&roommates),
        interests: item.interests,
        photos: with_placeholder(item.photos),
        roommates,
    }
}

pub fn from_seeker(item: SeekerQueueItem) -> SwipeCandidate {
    SwipeCandidate {
        id: item.id,
        name: item
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Seeker".to_owned()),
        bio: item.bio.unwrap_or_default(),
        city: item.city,
        available_from: item.available_from,
        available_to: item.available_to,
        rent_min: parse_money(item.budget_min.as_deref()),
        rent_max: parse_money(item.budget_max.as_deref()),
        field_of_study: item
            .major
            .filter(|major| !major.trim().is_empty())
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
        interests: item.interests,
        photos: with_placeholder(item.photos),
        roommates: Vec::new(),
    }
}

fn parse_money(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
}

fn with_placeholder(photos: Vec<String>) -> Vec<String> {
    if photos.is_empty() {
        vec![PLACEHOLDER_PHOTO.to_owned()]
    } else {
        photos
    }
}

fn joined_majors(roommates: &[RoommateSummary]) -> String {
    let mut majors: Vec<&str> = Vec::new();
    for roommate in roommates {
        if let Some(major) = roommate.major.as_deref() {
            if !major.is_empty() && !majors.contains(&major) {
                majors.push(major);
            }
        }
    }
    if majors.is_empty() {
        NOT_SPECIFIED.to_owned()
    } else {
        majors.join(", ")
    }
}

fn format_usd(amount: f64) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Roommate;

    fn listing_item() -> ListingQueueItem {
        serde_json::from_str(
            r#"{
                "id": "listing-1",
                "title": null,
                "city": "Ann Arbor",
                "state": "MI",
                "pricePerMonth": "1250.00",
                "status": "PUBLISHED",
                "availableFrom": "2026-05-01",
                "availableTo": null
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn format_usd_groups_thousands() {
        assert_eq!(format_usd(850.0), "$850");
        assert_eq!(format_usd(1250.4), "$1,250");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
        assert_eq!(format_usd(0.0), "$0");
    }

    #[test]
    fn listing_mapping_applies_fallbacks() {
        let candidate = from_listing(listing_item());

        assert_eq!(candidate.id, "listing-1");
        assert_eq!(candidate.name, "Untitled Listing");
        assert_eq!(candidate.rent_min, Some(1250.0));
        assert_eq!(candidate.rent_label(), "$1,250/mo");
        assert_eq!(candidate.photos, vec![PLACEHOLDER_PHOTO.to_owned()]);
        assert_eq!(candidate.field_of_study, NOT_SPECIFIED);
        assert_eq!(
            candidate.availability_label().as_deref(),
            Some("From 2026-05-01")
        );
    }

    #[test]
    fn listing_field_of_study_joins_unique_roommate_majors() {
        let mut item = listing_item();
        item.roommates = vec![
            Roommate {
                name: Some("Sam".into()),
                major: Some("CS".into()),
                ..blank_roommate()
            },
            Roommate {
                name: None,
                major: Some("Math".into()),
                ..blank_roommate()
            },
            Roommate {
                name: Some("Lee".into()),
                major: Some("CS".into()),
                ..blank_roommate()
            },
        ];

        let candidate = from_listing(item);
        assert_eq!(candidate.field_of_study, "CS, Math");
        assert_eq!(candidate.roommates[1].name, "Roommate");
    }

    #[test]
    fn seeker_mapping_parses_budget_range() {
        let item: SeekerQueueItem = serde_json::from_str(
            r#"{
                "id": "seeker-1",
                "bio": "Early riser",
                "term": "FALL",
                "termYear": 2026,
                "budgetMin": "500",
                "budgetMax": "700.50",
                "city": "Ann Arbor",
                "available_from": "2026-08-20",
                "available_to": "2026-12-20",
                "name": "Ada",
                "major": "EECS"
            }"#,
        )
        .unwrap();

        let candidate = from_seeker(item);
        assert_eq!(candidate.name, "Ada");
        assert_eq!(candidate.field_of_study, "EECS");
        assert_eq!(candidate.rent_label(), "$500 - $701/mo");
        assert_eq!(
            candidate.availability_label().as_deref(),
            Some("2026-08-20 - 2026-12-20")
        );
    }

    #[test]
    fn unparseable_money_becomes_unspecified() {
        let mut item = listing_item();
        item.price_per_month = Some("call us".into());
        let candidate = from_listing(item);
        assert_eq!(candidate.rent_label(), NOT_SPECIFIED);
    }

    fn blank_roommate() -> Roommate {
        serde_json::from_str("{}").unwrap()
    }
}
