//! Tests for the analytics module

use super::*;
use crate::error::Error;
use crate::node::{NodeIdentity, NodeParameters};
use crate::pagination::NextPage;
use crate::request::RequestOptions;
use crate::testing::ScriptedExecutor;
use crate::types::{JsonObject, Method};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn params() -> NodeParameters {
    NodeParameters::new(NodeIdentity::new("Analytics", "googleAnalytics"))
}

fn object(value: serde_json::Value) -> JsonObject {
    value.as_object().cloned().unwrap()
}

fn data_api_rows(start: usize, count: usize) -> Vec<serde_json::Value> {
    (start..start + count)
        .map(|i| json!({"dimensionValues": [{"value": format!("d{i}")}]}))
        .collect()
}

// ============================================================================
// ApiVersion / Request Tests
// ============================================================================

#[test_case("dataAPI", ApiVersion::DataApi ; "data api")]
#[test_case("v4", ApiVersion::ReportingV4 ; "reporting")]
#[test_case("universal", ApiVersion::ReportingV4 ; "legacy alias")]
#[test_case("", ApiVersion::ReportingV4 ; "empty")]
fn test_api_version_from_parameter(value: &str, expected: ApiVersion) {
    assert_eq!(ApiVersion::from_parameter(value), expected);
}

#[test]
fn test_api_version_base_url() {
    assert_eq!(
        ApiVersion::DataApi.base_url(),
        "https://analyticsdata.googleapis.com"
    );
    assert_eq!(
        ApiVersion::ReportingV4.base_url(),
        "https://analyticsreporting.googleapis.com"
    );
    assert_eq!(ApiVersion::DataApi.to_string(), "dataAPI");
}

#[test]
fn test_analytics_request_defaults() {
    let request = analytics_request(
        ApiVersion::ReportingV4,
        Method::POST,
        "/v4/reports:batchGet",
        Some(json!({})),
        JsonObject::new(),
        None,
    );

    assert_eq!(
        request.uri.as_deref(),
        Some("https://analyticsreporting.googleapis.com/v4/reports:batchGet")
    );
    assert_eq!(
        request.headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert_eq!(
        request.headers.get("Content-Type"),
        Some(&"application/json".to_string())
    );
    assert!(request.body.is_none());
    assert!(request.query.is_empty());
}

#[test]
fn test_analytics_request_uri_override_and_body() {
    let request = analytics_request(
        ApiVersion::DataApi,
        Method::POST,
        "/v1beta/properties/1:runReport",
        Some(json!({"dimensions": [{"name": "country"}]})),
        object(json!({"alt": "json"})),
        Some("https://proxy.example.com/report"),
    );

    assert_eq!(
        request.uri.as_deref(),
        Some("https://proxy.example.com/report")
    );
    assert_eq!(request.body, Some(json!({"dimensions": [{"name": "country"}]})));
    assert_eq!(request.query.get("alt"), Some(&json!("json")));
}

// ============================================================================
// Row Offset Strategy Tests
// ============================================================================

#[tokio::test]
async fn test_row_offset_fetches_until_row_count() {
    let executor = ScriptedExecutor::new(vec![
        json!({"rows": data_api_rows(0, 100), "rowCount": 250, "kind": "runReport"}),
        json!({"rows": data_api_rows(100, 100), "rowCount": 250, "kind": "runReport"}),
        json!({"rows": data_api_rows(200, 50), "rowCount": 250, "kind": "runReport"}),
    ]);
    let template = RequestOptions::post("/v1beta/properties/1:runReport");

    let result = PageStrategy::for_version(ApiVersion::DataApi, "reports")
        .fetch_all(&executor, &template)
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 3);
    let offsets: Vec<_> = executor
        .requests()
        .iter()
        .map(|r| r.query.get("offset").cloned())
        .collect();
    assert_eq!(offsets, vec![Some(json!(0)), Some(json!(100)), Some(json!(200))]);
    assert!(executor
        .requests()
        .iter()
        .all(|r| r.query.get("limit") == Some(&json!(100_000))));

    assert_eq!(result.len(), 1);
    let rows = result[0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 250);
    assert_eq!(rows[0]["dimensionValues"][0]["value"], "d0");
    assert_eq!(rows[249]["dimensionValues"][0]["value"], "d249");
    assert_eq!(result[0]["kind"], "runReport");
    assert_eq!(result[0]["rowCount"], 250);
}

#[tokio::test]
async fn test_row_offset_single_page() {
    let executor = ScriptedExecutor::new(vec![json!({"rows": data_api_rows(0, 3), "rowCount": 3})]);

    let result = PageStrategy::for_version(ApiVersion::DataApi, "")
        .fetch_all(&executor, &RequestOptions::post("/r"))
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 1);
    assert_eq!(result[0]["rows"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_row_offset_missing_rows_and_count() {
    let executor = ScriptedExecutor::new(vec![json!({"metadata": {}})]);

    let result = PageStrategy::for_version(ApiVersion::DataApi, "")
        .fetch_all(&executor, &RequestOptions::post("/r"))
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 1);
    assert_eq!(result, vec![json!({"metadata": {}, "rows": []})]);
}

#[tokio::test]
async fn test_row_offset_stops_when_page_is_empty() {
    let executor = ScriptedExecutor::new(vec![
        json!({"rows": data_api_rows(0, 10), "rowCount": 50}),
        json!({"rowCount": 50}),
    ]);

    let result = PageStrategy::for_version(ApiVersion::DataApi, "")
        .fetch_all(&executor, &RequestOptions::post("/r"))
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 2);
    assert_eq!(result[0]["rows"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_row_offset_rejects_non_object_response() {
    let executor = ScriptedExecutor::new(vec![json!([1, 2])]);

    let err = PageStrategy::for_version(ApiVersion::DataApi, "")
        .fetch_all(&executor, &RequestOptions::post("/r"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Page Token Strategy Tests
// ============================================================================

#[test]
fn test_next_page_token_locations() {
    let nested = json!({"reports": [{"nextPageToken": "n1"}]});
    assert!(matches!(next_page_token(&nested, "reports"), NextPage::Continue(_)));

    let top = json!({"reports": [{}], "nextPageToken": "t1"});
    assert!(next_page_token(&top, "reports").is_continue());

    let cleared = json!({"reports": [{"nextPageToken": ""}], "nextPageToken": ""});
    assert!(next_page_token(&cleared, "reports").is_done());
    assert!(next_page_token(&json!({}), "reports").is_done());
}

#[test]
fn test_with_page_token_batch_body() {
    let template = RequestOptions::post("/v4/reports:batchGet")
        .with_body(json!({"reportRequests": [{"viewId": "1"}, {"viewId": "2"}]}));

    let next = with_page_token(&template, "tok");
    assert_eq!(
        next.body,
        Some(json!({"reportRequests": [{"viewId": "1", "pageToken": "tok"}, {"viewId": "2"}]}))
    );
    assert_eq!(
        template.body,
        Some(json!({"reportRequests": [{"viewId": "1"}, {"viewId": "2"}]}))
    );
}

#[test]
fn test_with_page_token_top_level() {
    let template = RequestOptions::post("/v4/userActivity:search")
        .with_body(json!({"viewId": "1", "user": {"userId": "u"}}));
    let next = with_page_token(&template, "tok");
    assert_eq!(next.body.unwrap()["pageToken"], "tok");

    let next = with_page_token(&RequestOptions::post("/x"), "tok");
    assert_eq!(next.body, Some(json!({"pageToken": "tok"})));
}

#[tokio::test]
async fn test_page_token_follows_nested_tokens() {
    let executor = ScriptedExecutor::new(vec![
        json!({"reports": [{"id": 1, "nextPageToken": "p2"}]}),
        json!({"reports": [{"id": 2, "nextPageToken": "p3"}]}),
        json!({"reports": [{"id": 3}]}),
    ]);
    let template = RequestOptions::post("/v4/reports:batchGet")
        .with_body(json!({"reportRequests": [{"viewId": "1"}]}));

    let items = PageStrategy::for_version(ApiVersion::ReportingV4, "reports")
        .fetch_all(&executor, &template)
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 3);
    let ids: Vec<_> = items.iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);

    let tokens: Vec<_> = executor
        .requests()
        .iter()
        .map(|r| r.body.as_ref().unwrap()["reportRequests"][0].get("pageToken").cloned())
        .collect();
    assert_eq!(tokens, vec![None, Some(json!("p2")), Some(json!("p3"))]);
}

#[tokio::test]
async fn test_page_token_top_level() {
    let executor = ScriptedExecutor::new(vec![
        json!({"sessions": [{"id": "a"}, {"id": "b"}], "nextPageToken": "next"}),
        json!({"sessions": [{"id": "c"}], "nextPageToken": ""}),
    ]);
    let template = RequestOptions::post("/v4/userActivity:search").with_body(json!({"viewId": "1"}));

    let items = PageStrategy::for_version(ApiVersion::ReportingV4, "sessions")
        .fetch_all(&executor, &template)
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(executor.request_count(), 2);
    assert_eq!(executor.requests()[1].body.as_ref().unwrap()["pageToken"], "next");
}

#[tokio::test]
async fn test_page_token_stops_on_repeated_token() {
    let executor = ScriptedExecutor::new(vec![
        json!({"reports": [{"nextPageToken": "same"}]}),
        json!({"reports": [{"nextPageToken": "same"}]}),
        json!({"reports": [{}]}),
    ]);

    let items = PageStrategy::for_version(ApiVersion::ReportingV4, "reports")
        .fetch_all(&executor, &RequestOptions::post("/r"))
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 2);
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_page_token_missing_property() {
    let executor = ScriptedExecutor::new(vec![json!({"error": "none"})]);

    let items = PageStrategy::for_version(ApiVersion::ReportingV4, "reports")
        .fetch_all(&executor, &RequestOptions::post("/r"))
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(executor.request_count(), 1);
}

#[tokio::test]
async fn test_request_all_items_dispatches_on_api_version() {
    let executor = ScriptedExecutor::new(vec![json!({"rows": [], "rowCount": 0})]);
    let data_params = params().with("apiVersion", "dataAPI");

    let result = request_all_items(&executor, &data_params, "reports", &RequestOptions::post("/r"))
        .await
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(executor.requests()[0].query.contains_key("offset"));

    let executor = ScriptedExecutor::new(vec![json!({"reports": [{"a": 1}]})]);
    let result = request_all_items(&executor, &params(), "reports", &RequestOptions::post("/r"))
        .await
        .unwrap();
    assert_eq!(result, vec![json!({"a": 1})]);
    assert!(executor.requests()[0].query.is_empty());
}

// ============================================================================
// Transform Tests
// ============================================================================

fn report(dimensions: Option<Vec<&str>>, rows: Option<serde_json::Value>) -> Report {
    let mut column_header = json!({});
    if let Some(d) = dimensions {
        column_header["dimensions"] = json!(d);
    }
    let mut data = json!({});
    if let Some(r) = rows {
        data["rows"] = r;
    }
    Report::from_value(&json!({"columnHeader": column_header, "data": data})).unwrap()
}

#[test]
fn test_simplify_with_dimensions() {
    let reports = vec![report(
        Some(vec!["country"]),
        Some(json!([{"dimensions": ["US"], "metrics": [{"values": ["42"]}]}])),
    )];

    let records = simplify(&reports);
    assert_eq!(
        serde_json::Value::Array(records.into_iter().map(serde_json::Value::Object).collect()),
        json!([{"country": "US", "total": "42"}])
    );
}

#[test]
fn test_simplify_without_dimensions_and_multiple_metrics() {
    let reports = vec![report(
        None,
        Some(json!([{"metrics": [{"values": ["1", "2"]}, {"values": ["9"]}]}])),
    )];

    let records = simplify(&reports);
    assert_eq!(records.len(), 1);
    assert_eq!(serde_json::Value::Object(records[0].clone()), json!({"total": "1,2"}));
}

#[test]
fn test_simplify_skips_reports_without_rows() {
    let reports = vec![
        report(Some(vec!["country"]), None),
        report(
            Some(vec!["country", "city"]),
            Some(json!([{"dimensions": ["DE"], "metrics": [{"values": ["7"]}]}])),
        ),
    ];

    let records = simplify(&reports);
    assert_eq!(records.len(), 1);
    assert_eq!(
        serde_json::Value::Object(records[0].clone()),
        json!({"country": "DE", "city": null, "total": "7"})
    );
}

#[test]
fn test_report_requires_column_header_and_data() {
    let err = Report::from_value(&json!({"data": {}})).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(Report::from_values(&[json!({"columnHeader": {}, "data": {}}), json!(1)]).is_err());
}

#[test]
fn test_simplify_data_api() {
    let response = json!({
        "dimensionHeaders": [{"name": "country"}],
        "metricHeaders": [{"name": "activeUsers", "type": "TYPE_INTEGER"}, {"name": "sessions"}],
        "rows": [
            {"dimensionValues": [{"value": "US"}], "metricValues": [{"value": "5"}, {"value": "8"}]},
            {"dimensionValues": [{"value": "FR"}], "metricValues": [{"value": "1"}]}
        ]
    });

    let records: Vec<_> = simplify_data_api(&response)
        .into_iter()
        .map(serde_json::Value::Object)
        .collect();
    assert_eq!(
        records,
        vec![
            json!({"country": "US", "activeUsers": "5", "sessions": "8"}),
            json!({"country": "FR", "activeUsers": "1", "sessions": null}),
        ]
    );
    assert!(simplify_data_api(&json!({"rowCount": 0})).is_empty());
}

#[test]
fn test_merge_concatenates_rows_in_order() {
    let reports = vec![
        report(Some(vec!["country"]), Some(json!([{"dimensions": ["US"]}]))),
        report(Some(vec!["country"]), None),
        report(
            Some(vec!["country"]),
            Some(json!([{"dimensions": ["FR"]}, {"dimensions": ["DE"]}])),
        ),
    ];

    let merged = merge(reports);
    assert_eq!(merged.len(), 1);
    let rows = merged[0].data.rows().unwrap();
    let countries: Vec<_> = rows.iter().map(|r| r.dimensions()[0].clone()).collect();
    assert_eq!(countries, vec!["US", "FR", "DE"]);
    assert_eq!(merged[0].column_header.dimensions(), ["country".to_string()]);
}

#[test]
fn test_merge_single_report_is_unchanged() {
    let raw = json!({
        "columnHeader": {"dimensions": ["ga:country"], "metricHeader": {"metricHeaderEntries": []}},
        "data": {"rows": [{"dimensions": ["US"], "metrics": [{"values": ["3"]}]}], "rowCount": 1},
        "nextPageToken": "x"
    });
    let reports = Report::from_values(&[raw.clone()]).unwrap();

    let merged = merge(reports.clone());
    assert_eq!(merged, reports);
    assert_eq!(merged[0].to_value().unwrap(), raw);
}

#[test]
fn test_merge_single_report_keeps_metrics_without_values() {
    let raw = json!({
        "columnHeader": {"dimensions": ["ga:country"]},
        "data": {"rows": [{"dimensions": ["US"], "metrics": [{"pivotValueRegions": []}]}]}
    });
    let reports = Report::from_values(&[raw.clone()]).unwrap();

    let merged = merge(reports);
    assert_eq!(merged[0].to_value().unwrap(), raw);
    assert_eq!(merged[0].data.rows().unwrap()[0].total(), "");
}

#[test]
fn test_report_keeps_explicit_nulls() {
    let raw = json!({
        "columnHeader": {"dimensions": null},
        "data": {"rows": [{"dimensions": null, "metrics": [{"values": null}]}], "totals": null}
    });
    let report = Report::from_value(&raw).unwrap();

    assert_eq!(report.to_value().unwrap(), raw);
    assert!(report.column_header.dimensions().is_empty());
    assert_eq!(simplify(&[report]), vec![JsonObject::from_iter([(
        "total".to_string(),
        json!("")
    )])]);
}

#[test]
fn test_merge_fills_rows_missing_from_first_report() {
    let reports = vec![
        Report::from_value(&json!({"columnHeader": {}, "data": {"rows": null}})).unwrap(),
        report(None, Some(json!([{"dimensions": ["NL"]}]))),
    ];

    let merged = merge(reports);
    assert_eq!(merged[0].data.rows().map(<[_]>::len), Some(1));
}

#[test]
fn test_merge_empty() {
    assert!(merge(Vec::new()).is_empty());
}

#[test]
fn test_process_filters_numeric() {
    let expression = object(json!({
        "numericFilter": [{"fieldName": "x", "valueType": "int64Value", "value": "5"}]
    }));

    let filters = process_filters(&expression).unwrap();
    assert_eq!(
        filters,
        vec![json!({"filter": {"fieldName": "x", "numericFilter": {"value": {"int64Value": "5"}}}})]
    );
}

#[test]
fn test_process_filters_in_list_and_between() {
    let expression = object(json!({
        "inListFilter": [{"fieldName": "country", "values": "US,FR", "caseSensitive": true}],
        "betweenFilter": [{
            "fieldName": "sessions",
            "valueType": "doubleValue",
            "fromValue": "1.5",
            "toValue": "9"
        }]
    }));

    let mut filters = process_filters(&expression).unwrap();
    filters.sort_by_key(|f| f["filter"]["fieldName"].as_str().unwrap_or_default().to_string());

    assert_eq!(
        filters,
        vec![
            json!({"filter": {"fieldName": "country", "inListFilter": {"values": ["US", "FR"], "caseSensitive": true}}}),
            json!({"filter": {"fieldName": "sessions", "betweenFilter": {
                "fromValue": {"doubleValue": "1.5"},
                "toValue": {"doubleValue": "9"}
            }}}),
        ]
    );
}

#[test]
fn test_process_filters_passthrough_and_errors() {
    let expression = object(json!({
        "stringFilter": [{"fieldName": "city", "matchType": "EXACT", "value": "Paris"}]
    }));
    assert_eq!(
        process_filters(&expression).unwrap(),
        vec![json!({"filter": {"fieldName": "city", "stringFilter": {"matchType": "EXACT", "value": "Paris"}}})]
    );

    let missing_type = object(json!({"numericFilter": [{"fieldName": "x", "value": "1"}]}));
    assert!(matches!(
        process_filters(&missing_type),
        Err(Error::Decode { .. })
    ));

    let not_a_list = object(json!({"numericFilter": {"fieldName": "x"}}));
    assert!(process_filters(&not_a_list).is_err());
}

// ============================================================================
// fetch_report Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_report_reporting_simple() {
    let executor = ScriptedExecutor::new(vec![json!({"reports": [{
        "columnHeader": {"dimensions": ["ga:country"]},
        "data": {"rows": [{"dimensions": ["US"], "metrics": [{"values": ["42"]}]}]}
    }]})]);

    let result = fetch_report(&executor, &params(), "reports", &RequestOptions::post("/r"))
        .await
        .unwrap();
    assert_eq!(result, vec![json!({"ga:country": "US", "total": "42"})]);
}

#[tokio::test]
async fn test_fetch_report_reporting_merged_return_all() {
    let page = |country: &str, token: Option<&str>| {
        let mut report = json!({
            "columnHeader": {"dimensions": ["ga:country"]},
            "data": {"rows": [{"dimensions": [country], "metrics": [{"values": ["1"]}]}]}
        });
        if let Some(t) = token {
            report["nextPageToken"] = json!(t);
        }
        json!({"reports": [report]})
    };
    let executor = ScriptedExecutor::new(vec![page("US", Some("p2")), page("FR", None)]);
    let params = params().with("returnAll", true).with("simple", false);
    let template = RequestOptions::post("/v4/reports:batchGet")
        .with_body(json!({"reportRequests": [{"viewId": "1"}]}));

    let result = fetch_report(&executor, &params, "reports", &template)
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 2);
    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0]["data"]["rows"],
        json!([
            {"dimensions": ["US"], "metrics": [{"values": ["1"]}]},
            {"dimensions": ["FR"], "metrics": [{"values": ["1"]}]}
        ])
    );
}

#[tokio::test]
async fn test_fetch_report_data_api() {
    let response = json!({
        "dimensionHeaders": [{"name": "country"}],
        "metricHeaders": [{"name": "activeUsers"}],
        "rows": [{"dimensionValues": [{"value": "US"}], "metricValues": [{"value": "5"}]}],
        "rowCount": 1
    });

    let executor = ScriptedExecutor::new(vec![response.clone()]);
    let params = params().with("apiVersion", "dataAPI");
    let result = fetch_report(&executor, &params, "", &RequestOptions::post("/r"))
        .await
        .unwrap();
    assert_eq!(result, vec![json!({"country": "US", "activeUsers": "5"})]);
    assert!(executor.requests()[0].query.is_empty());

    let executor = ScriptedExecutor::new(vec![response.clone()]);
    let params = params.with("simple", false).with("returnAll", true);
    let result = fetch_report(&executor, &params, "", &RequestOptions::post("/r"))
        .await
        .unwrap();
    assert_eq!(result, vec![response]);
    assert_eq!(executor.requests()[0].query.get("offset"), Some(&json!(0)));
}
