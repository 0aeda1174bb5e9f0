use facturacom::customer::{CustomerUpdate, NewCustomer};
use facturacom::{FacturaCom, FacturaError};
use mockito::{Matcher, Server};
use serde_json::json;

fn client(server: &mockito::ServerGuard) -> FacturaCom {
    FacturaCom::with_base_url("test-key", "test-secret", server.url()).unwrap()
}

fn canned_customer() -> serde_json::Value {
    json!({
        "UID": "6169fc02637e1",
        "RazonSocial": "ACME SA DE CV",
        "RFC": "XAXX010101000",
        "Regimen": "General de Ley Personas Morales",
        "RegimenId": 601,
        "Calle": "Av. Reforma",
        "Numero": "123",
        "Interior": null,
        "Colonia": "Centro",
        "CodigoPostal": "06000",
        "Ciudad": "CDMX",
        "Delegacion": "Cuauhtémoc",
        "Estado": "Ciudad de México",
        "Pais": "MEX",
        "NumRegIdTrib": null,
        "UsoCFDI": "G03",
        "Contacto": {
            "Nombre": "Ana",
            "Apellidos": "Pérez",
            "Email": "ana@acme.mx",
            "Email2": null,
            "Email3": null,
            "Telefono": "5512345678"
        },
        "cfdis": 7,
        "cuentas_banco": []
    })
}

#[tokio::test]
async fn all_lists_customers_from_the_data_array() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/clients")
        .with_status(200)
        .with_body(json!({"status": "success", "data": [canned_customer()]}).to_string())
        .create_async()
        .await;

    let customers = client(&server).customer.all().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].uid, "6169fc02637e1");
    assert_eq!(customers[0].contact.email.as_deref(), Some("ana@acme.mx"));
    assert_eq!(customers[0].cfdi_qty, 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn get_by_id_reads_the_capitalized_data_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/clients/XAXX010101000")
        .with_status(200)
        .with_body(json!({"status": "success", "Data": canned_customer()}).to_string())
        .create_async()
        .await;

    let customer = client(&server)
        .customer
        .get_by_id("XAXX010101000")
        .await
        .unwrap();
    assert_eq!(customer.rfc, "XAXX010101000");
    assert_eq!(customer.tax_regime_id, Some(601));
    assert!(customer.building_number.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn filter_duplicated_by_rfc_hits_the_rfc_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/clients/rfc/XAXX010101000")
        .with_status(200)
        .with_body(
            json!({"status": "success", "Data": [canned_customer(), canned_customer()]})
                .to_string(),
        )
        .create_async()
        .await;

    let duplicated = client(&server)
        .customer
        .filter_duplicated_by_rfc("XAXX010101000")
        .await
        .unwrap();
    assert_eq!(duplicated.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn create_sends_required_fields_and_omits_unset_ones() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/clients/create")
        .match_body(Matcher::Json(json!({
            "rfc": "XAXX010101000",
            "razons": "ACME SA DE CV",
            "codpos": "06000",
            "email": "ana@acme.mx",
            "regimen": 601,
            "pais": "MEX"
        })))
        .with_status(200)
        .with_body(json!({"status": "success", "Data": canned_customer()}).to_string())
        .create_async()
        .await;

    let new_customer =
        NewCustomer::new("XAXX010101000", "ACME SA DE CV", "06000", "ana@acme.mx", 601);
    let customer = client(&server).customer.create(&new_customer).await.unwrap();
    assert_eq!(customer.company_name, "ACME SA DE CV");
    mock.assert_async().await;
}

#[tokio::test]
async fn create_flattens_field_mapped_validation_errors() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/clients/create")
        .with_status(200)
        .with_body(
            json!({
                "status": "error",
                "message": {
                    "email": ["The email field is required."],
                    "rfc": ["The rfc is invalid."]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let new_customer = NewCustomer::new("BAD", "ACME", "06000", "", 601);
    let err = client(&server).customer.create(&new_customer).await.unwrap_err();
    match err {
        FacturaError::Api(message) => {
            assert!(message.contains("email: The email field is required."));
            assert!(message.contains("rfc: The rfc is invalid."));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_is_partial_and_returns_the_fresh_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/clients/6169fc02637e1/update")
        .match_body(Matcher::Json(json!({"email": "nuevo@acme.mx"})))
        .with_status(200)
        .with_body(json!({"status": "success", "Data": canned_customer()}).to_string())
        .create_async()
        .await;

    let update = CustomerUpdate::new().email("nuevo@acme.mx");
    let customer = client(&server)
        .customer
        .update("6169fc02637e1", &update)
        .await
        .unwrap();
    assert_eq!(customer.uid, "6169fc02637e1");
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_returns_the_confirmation_message() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/clients/6169fc02637e1/drop")
        .with_status(200)
        .with_body(json!({"status": "success", "message": "Cliente eliminado"}).to_string())
        .create_async()
        .await;

    let message = client(&server)
        .customer
        .delete("6169fc02637e1")
        .await
        .unwrap();
    assert_eq!(message, "Cliente eliminado");
    mock.assert_async().await;
}

#[tokio::test]
async fn round_trip_from_response_to_sparse_update() {
    let mut server = Server::new_async().await;
    let _get = server
        .mock("GET", "/v1/clients/6169fc02637e1")
        .with_status(200)
        .with_body(json!({"status": "success", "Data": canned_customer()}).to_string())
        .create_async()
        .await;

    let api = client(&server);
    let customer = api.customer.get_by_id("6169fc02637e1").await.unwrap();

    // Re-serializing only the fields carried over keeps the update sparse.
    let update = CustomerUpdate::new()
        .zip_code(customer.zip_code.clone())
        .email(customer.contact.email.clone().unwrap());
    let update_mock = server
        .mock("POST", "/v1/clients/6169fc02637e1/update")
        .match_body(Matcher::Json(json!({
            "codpos": "06000",
            "email": "ana@acme.mx"
        })))
        .with_status(200)
        .with_body(json!({"status": "success", "Data": canned_customer()}).to_string())
        .create_async()
        .await;

    api.customer.update("6169fc02637e1", &update).await.unwrap();
    update_mock.assert_async().await;
}
