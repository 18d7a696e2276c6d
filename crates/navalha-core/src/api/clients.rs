use super::{ApiError, ApiSession, delete, get, post, put};
use crate::models::{ClientDraft, ClientRecord, ClientUpdate};
use crate::transport::HttpTransport;

pub fn list_clients(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<Vec<ClientRecord>, ApiError> {
    get(transport, session, "/clients")
}

pub fn create_client(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    draft: &ClientDraft,
) -> Result<ClientRecord, ApiError> {
    post(transport, session, "/clients", draft)
}

pub fn update_client(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    client_id: i64,
    update: &ClientUpdate,
) -> Result<ClientRecord, ApiError> {
    put(transport, session, &format!("/clients/{client_id}"), update)
}

/// The backend soft-deletes; the record stays listed with `ativo = false`.
pub fn deactivate_client(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    client_id: i64,
) -> Result<serde_json::Value, ApiError> {
    delete(transport, session, &format!("/clients/{client_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingTransport, json_response};
    use crate::transport::HttpMethod;

    fn session() -> ApiSession {
        ApiSession::new("http://localhost:8000").with_token("jwt-abc")
    }

    #[test]
    fn create_client_posts_wire_payload() {
        let transport = RecordingTransport::new(vec![json_response(
            200,
            r#"{
                "id": 5,
                "nome": "Maria Silva",
                "email": "maria@example.com",
                "telefone": "11 99999-0000",
                "ativo": true,
                "aceite_lgpd": true
            }"#,
        )]);

        let draft = ClientDraft {
            name: "Maria Silva".to_string(),
            email: Some("maria@example.com".to_string()),
            phone: "11 99999-0000".to_string(),
            lgpd_consent: true,
        };
        let record = create_client(&transport, &session(), &draft).expect("record");

        assert_eq!(record.id, 5);
        assert!(record.lgpd_consent);

        let reqs = transport.requests();
        let body = reqs[0].body.as_ref().expect("body");
        assert_eq!(body["nome"], "Maria Silva");
        assert_eq!(body["telefone"], "11 99999-0000");
        assert_eq!(body["aceite_lgpd"], true);
    }

    #[test]
    fn deactivate_client_issues_delete() {
        let transport =
            RecordingTransport::new(vec![json_response(200, r#"{"message": "ok"}"#)]);

        deactivate_client(&transport, &session(), 5).expect("deactivate");

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "http://localhost:8000/api/clients/5");
    }

    #[test]
    fn client_without_email_still_parses() {
        let transport = RecordingTransport::new(vec![json_response(
            200,
            r#"[{"id": 1, "nome": "João", "telefone": "11 98888-0000", "ativo": true, "aceite_lgpd": false}]"#,
        )]);

        let records = list_clients(&transport, &session()).expect("records");
        assert_eq!(records[0].email, None);
    }
}
