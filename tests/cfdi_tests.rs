use facturacom::cfdi::{CfdiFilters, CfdiRequest, Item, ItemTax, RelatedCfdi};
use facturacom::codes::TaxFactorType;
use facturacom::{FacturaCom, FacturaError};
use mockito::{Matcher, Server};
use rust_decimal_macros::dec;
use serde_json::json;

fn client(server: &mockito::ServerGuard) -> FacturaCom {
    FacturaCom::with_base_url("test-key", "test-secret", server.url()).unwrap()
}

fn service_item() -> Item {
    let tax = ItemTax::new(dec!(100), "002", dec!(0.16), dec!(16), TaxFactorType::Rate).unwrap();
    Item::new("84111506", dec!(1), "E48", "Unidad de servicio", dec!(100), "Desarrollo")
        .transferred_tax(tax)
}

fn minimal_request() -> CfdiRequest {
    CfdiRequest::new("6169fc02637e1", "factura", "G03", 1234, "03", "PUE").item(service_item())
}

fn stamped_response() -> serde_json::Value {
    json!({
        "response": "success",
        "message": "Factura creada correctamente",
        "UUID": "aaaa1111-bbbb-2222-cccc-333344445555",
        "uid": "5f2e6a1b",
        "SAT": {
            "FechaTimbrado": "2024-05-15 13:45:10",
            "NoCertificadoSAT": "00001000000504465028",
            "Version": "4.0",
            "SelloSAT": "sat-seal==",
            "SelloCFD": "cfd-seal=="
        },
        "INV": {
            "Serie": 1234,
            "Folio": 972
        }
    })
}

#[tokio::test]
async fn all_copies_pagination_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v4/cfdi/list")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("month".into(), "05".into()),
            Matcher::UrlEncoded("year".into(), "2024".into()),
            Matcher::UrlEncoded("per_page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "total": 38,
                "per_page": 2,
                "current_page": 1,
                "last_page": 19,
                "from": 1,
                "to": 2,
                "data": [
                    {"UID": "a1", "UUID": "u1", "Folio": "147", "Total": 1740.0},
                    {"UID": "a2", "UUID": "u2", "Folio": 148, "Total": 920.5}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let filters = CfdiFilters::new().month(5).year(2024).per_page(2);
    let list = client(&server).cfdi.all(&filters).await.unwrap();
    assert_eq!(list.total, 38);
    assert_eq!(list.per_page, 2);
    assert_eq!(list.current_page, 1);
    assert_eq!(list.last_page, 19);
    assert_eq!(list.from, Some(1));
    assert_eq!(list.to, Some(2));
    assert_eq!(list.data.len(), 2);
    assert_eq!(list.data[1].folio.as_deref(), Some("148"));
    assert_eq!(list.data[1].total, Some(dec!(920.5)));
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_month_filter_fails_before_any_request() {
    let server = Server::new_async().await;
    let err = client(&server)
        .cfdi
        .all(&CfdiFilters::new().month(13))
        .await
        .unwrap_err();
    assert!(matches!(err, FacturaError::InvalidArgument(_)));
}

#[tokio::test]
async fn get_by_each_valid_kind_hits_the_matching_path() {
    let mut server = Server::new_async().await;
    let body = json!({"UID": "a1", "UUID": "u1", "Folio": "147", "Status": "enviada"}).to_string();
    let uid_mock = server
        .mock("GET", "/v4/cfdi/uid/a1")
        .with_status(200)
        .with_body(&body)
        .create_async()
        .await;
    let uuid_mock = server
        .mock("GET", "/v4/cfdi/uuid/u1")
        .with_status(200)
        .with_body(&body)
        .create_async()
        .await;
    let folio_mock = server
        .mock("GET", "/v4/cfdi/folio/147")
        .with_status(200)
        .with_body(&body)
        .create_async()
        .await;

    let api = client(&server);
    assert_eq!(api.cfdi.get_by_uid("a1").await.unwrap().uid.as_deref(), Some("a1"));
    assert_eq!(
        api.cfdi.get_by_uuid("u1").await.unwrap().uuid.as_deref(),
        Some("u1")
    );
    assert_eq!(
        api.cfdi.get_by_folio("147").await.unwrap().folio.as_deref(),
        Some("147")
    );
    uid_mock.assert_async().await;
    uuid_mock.assert_async().await;
    folio_mock.assert_async().await;
}

#[tokio::test]
async fn get_by_id_rejects_unknown_kinds_locally() {
    let server = Server::new_async().await;
    let err = client(&server)
        .cfdi
        .get_by_id("a1", "serie")
        .await
        .unwrap_err();
    let FacturaError::InvalidArgument(message) = err else {
        panic!("expected InvalidArgument");
    };
    assert!(message.contains("uid, uuid, folio"));
}

#[tokio::test]
async fn get_surfaces_error_status_responses() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v4/cfdi/uuid/missing")
        .with_status(200)
        .with_body(json!({"status": "error", "message": "CFDI no encontrado"}).to_string())
        .create_async()
        .await;

    let err = client(&server).cfdi.get_by_uuid("missing").await.unwrap_err();
    match err {
        FacturaError::Api(message) => assert_eq!(message, "CFDI no encontrado"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_targets_the_cfdi40_endpoint_and_maps_the_stamp() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v4/cfdi40/create")
        .match_body(Matcher::PartialJson(json!({
            "Receptor": {"UID": "6169fc02637e1", "ResidenciaFiscal": ""},
            "TipoDocumento": "factura",
            "UsoCFDI": "G03",
            "Serie": 1234,
            "FormaPago": "03",
            "MetodoPago": "PUE",
            "Moneda": "MXN",
            "EnviarCorreo": true,
            "BorradorSiFalla": 0,
            "Draft": 0
        })))
        .with_status(200)
        .with_body(stamped_response().to_string())
        .create_async()
        .await;

    let stamped = client(&server).cfdi.create(&minimal_request()).await.unwrap();
    assert_eq!(stamped.message, "Factura creada correctamente");
    assert_eq!(stamped.uuid, "aaaa1111-bbbb-2222-cccc-333344445555");
    assert_eq!(stamped.uid, "5f2e6a1b");
    assert_eq!(stamped.sat_certificate_number, "00001000000504465028");
    assert_eq!(stamped.version, "4.0");
    assert_eq!(stamped.sat_stamp, "sat-seal==");
    assert_eq!(stamped.cfd_stamp, "cfd-seal==");
    assert_eq!(stamped.series, "1234");
    assert_eq!(stamped.folio, "972");
    let stamped_at = stamped.stamped_at.unwrap();
    assert_eq!(stamped_at.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-15 13:45:10");
    mock.assert_async().await;
}

#[tokio::test]
async fn create_accepts_every_document_type_code() {
    for code in [
        "factura",
        "factura_hotel",
        "honorarios",
        "nota_cargo",
        "donativos",
        "arrendamiento",
        "nota_credito",
        "nota_debito",
        "nota_devolucion",
        "carta_porte",
        "carta_porte_ingreso",
        "pago",
        "retencion",
    ] {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v4/cfdi40/create")
            .match_body(Matcher::PartialJson(json!({"TipoDocumento": code})))
            .with_status(200)
            .with_body(stamped_response().to_string())
            .create_async()
            .await;

        let request =
            CfdiRequest::new("uid", code, "G03", 1, "03", "PUE").item(service_item());
        let result = client(&server).cfdi.create(&request).await;
        assert!(result.is_ok(), "document type {code} should be accepted");
    }
}

#[tokio::test]
async fn create_rejects_unknown_document_types_locally() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v4/cfdi40/create")
        .expect(0)
        .create_async()
        .await;

    let request =
        CfdiRequest::new("uid", "factura_invalida", "G03", 1, "03", "PUE").item(service_item());
    let err = client(&server).cfdi.create(&request).await.unwrap_err();
    let FacturaError::InvalidArgument(message) = err else {
        panic!("expected InvalidArgument");
    };
    assert!(message.contains("factura"));
    assert!(message.contains("retencion"));
    mock.assert_async().await;
}

#[tokio::test]
async fn create_requires_an_exchange_rate_for_foreign_currency() {
    let server = Server::new_async().await;
    let err = client(&server)
        .cfdi
        .create(&minimal_request().currency("USD"))
        .await
        .unwrap_err();
    assert!(matches!(err, FacturaError::InvalidArgument(_)));
}

#[tokio::test]
async fn create_sends_the_exchange_rate_when_supplied() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v4/cfdi40/create")
        .match_body(Matcher::PartialJson(json!({
            "Moneda": "USD",
            "TipoCambio": 17.35
        })))
        .with_status(200)
        .with_body(stamped_response().to_string())
        .create_async()
        .await;

    let request = minimal_request().currency("USD").exchange_rate(dec!(17.35));
    client(&server).cfdi.create(&request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn create_includes_related_cfdis_only_when_present() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v4/cfdi40/create")
        .match_body(Matcher::PartialJson(json!({
            "CfdiRelacionados": [
                {"UUID": "dddd-eeee", "TipoRelacion": "01"}
            ]
        })))
        .with_status(200)
        .with_body(stamped_response().to_string())
        .create_async()
        .await;

    let request = minimal_request().related_cfdi(RelatedCfdi::new("dddd-eeee", "01"));
    client(&server).cfdi.create(&request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn create_unwraps_nested_failure_messages() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v4/cfdi40/create")
        .with_status(200)
        .with_body(
            json!({
                "response": "error",
                "message": {"message": "El receptor no existe"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server).cfdi.create(&minimal_request()).await.unwrap_err();
    match err {
        FacturaError::Api(message) => assert_eq!(message, "El receptor no existe"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn global_cfdi_triple_is_all_or_nothing() {
    let server = Server::new_async().await;
    let api = client(&server);

    let partial = minimal_request().global_periodicity("04").global_year(2024);
    let err = api.cfdi.create(&partial).await.unwrap_err();
    assert!(matches!(err, FacturaError::InvalidArgument(_)));

    drop(server);
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v4/cfdi40/create")
        .match_body(Matcher::PartialJson(json!({
            "InformacionGlobal": {"Periodicidad": "04", "Meses": "05", "Año": 2024}
        })))
        .with_status(200)
        .with_body(stamped_response().to_string())
        .create_async()
        .await;

    let full = minimal_request()
        .global_periodicity("04")
        .global_months("05")
        .global_year(2024);
    client(&server).cfdi.create(&full).await.unwrap();
    mock.assert_async().await;
}
