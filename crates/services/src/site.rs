//! Site inventory retrieval in RDB format

use networking::HttpClient;
use rdb::RdbRecord;

use crate::Result;

/// Path of the site service, resolved against the water services root
pub const SITE_SERVICE_PATH: &str = "/nwis/site/";

/// Fetch the site service records for a monitoring location
///
/// Requests the expanded RDB site output and decodes every row. Returns
/// `None` when the service does not answer with success, which includes
/// the empty response of a timed out request.
pub async fn fetch_site_records(
    client: &HttpClient,
    service_root: &str,
    site_no: &str,
    agency_cd: Option<&str>,
) -> Result<Option<Vec<RdbRecord>>> {
    let mut params = vec![
        ("sites", site_no),
        ("format", "rdb"),
        ("siteOutput", "expanded"),
        ("siteStatus", "all"),
    ];
    if let Some(agency_cd) = agency_cd {
        params.push(("agencyCd", agency_cd));
    }

    let response = client
        .get(service_root, Some(SITE_SERVICE_PATH), params)
        .await?;
    if !response.is_ok() {
        tracing::debug!(site_no, status = ?response.status(), "site service returned no data");
        return Ok(None);
    }

    let body = response.text();
    let records = rdb::parse_rdb_str(&body)?.collect();
    Ok(Some(records))
}
