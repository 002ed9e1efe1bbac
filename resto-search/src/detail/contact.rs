use crate::types::Row;

const MAPS_DIRECTIONS: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Links for the contact actions; `None` when the restaurant lacks the data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactLinks {
    pub call: Option<String>,
    pub whatsapp: Option<String>,
    pub directions: Option<String>,
    pub web: Option<String>,
}

impl ContactLinks {
    pub fn for_restaurant(row: &Row, full_address: Option<&str>) -> Self {
        Self {
            call: call_link(row.phone.as_deref()),
            whatsapp: whatsapp_link(row),
            directions: directions_link(row.lat, row.lng, full_address),
            web: row.web.as_deref().and_then(web_link),
        }
    }
}

fn call_link(phone: Option<&str>) -> Option<String> {
    let phone: String = phone?.chars().filter(|c| !c.is_whitespace()).collect();
    (!phone.is_empty()).then(|| format!("tel:{}", phone))
}

/// The WhatsApp number, or the phone when there is none; digits only.
fn whatsapp_link(row: &Row) -> Option<String> {
    let source = [&row.whatsapp, &row.phone]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .find(|v| !v.trim().is_empty())?;
    let digits: String = source.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let greeting = format!("Hola, quiero información sobre \"{}\"", row.name);
    Some(format!(
        "https://wa.me/{}?text={}",
        digits,
        urlencoding::encode(&greeting)
    ))
}

/// Driving directions to the coordinates, or to the address without them.
fn directions_link(lat: Option<f64>, lng: Option<f64>, address: Option<&str>) -> Option<String> {
    let destination = match (lat, lng) {
        (Some(lat), Some(lng)) => format!("{},{}", lat, lng),
        _ => urlencoding::encode(address?).into_owned(),
    };
    Some(format!("{}{}&travelmode=driving", MAPS_DIRECTIONS, destination))
}

/// Absolute URLs pass through; a bare domain gets https; anything else is dropped.
fn web_link(web: &str) -> Option<String> {
    let web = web.trim();
    let lower = web.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(web.to_string());
    }
    looks_like_domain(web).then(|| format!("https://{}", web))
}

fn looks_like_domain(value: &str) -> bool {
    let Some((host, tld)) = value.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}
