use super::{ApiError, ApiSession, get, post, put};
use crate::models::{Service, ServiceDraft, ServiceUpdate, StaffUser};
use crate::transport::HttpTransport;

pub fn list_services(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    active_only: bool,
) -> Result<Vec<Service>, ApiError> {
    let path = if active_only {
        "/services?active_only=true"
    } else {
        "/services"
    };
    get(transport, session, path)
}

pub fn create_service(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    draft: &ServiceDraft,
) -> Result<Service, ApiError> {
    post(transport, session, "/services", draft)
}

pub fn update_service(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    service_id: i64,
    update: &ServiceUpdate,
) -> Result<Service, ApiError> {
    put(
        transport,
        session,
        &format!("/services/{service_id}"),
        update,
    )
}

pub fn list_staff(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<Vec<StaffUser>, ApiError> {
    get(transport, session, "/users")
}

pub fn list_barbers(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<Vec<StaffUser>, ApiError> {
    get(transport, session, "/users/barbeiros/list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingTransport, json_response};

    fn session() -> ApiSession {
        ApiSession::new("http://localhost:8000").with_token("jwt-abc")
    }

    #[test]
    fn list_services_filters_active_when_asked() {
        let transport = RecordingTransport::new(vec![json_response(200, "[]")]);

        list_services(&transport, &session(), true).expect("services");
        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:8000/api/services?active_only=true"
        );
    }

    #[test]
    fn create_service_converts_price_to_reais() {
        let transport = RecordingTransport::new(vec![json_response(
            200,
            r#"{"id": 3, "nome": "Barba", "preco": 25.5, "duracao_minutos": 20, "ativo": true}"#,
        )]);

        let draft = ServiceDraft {
            name: "Barba".to_string(),
            description: None,
            price_centavos: 2550,
            duration_minutes: 20,
        };
        let service = create_service(&transport, &session(), &draft).expect("service");

        assert_eq!(service.price_centavos, 2550);

        let reqs = transport.requests();
        let body = reqs[0].body.as_ref().expect("body");
        assert_eq!(body["preco"], 25.5);
        assert_eq!(body["duracao_minutos"], 20);
        assert!(body.get("descricao").is_none());
    }

    #[test]
    fn list_barbers_uses_dedicated_route() {
        let transport = RecordingTransport::new(vec![json_response(
            200,
            r#"[{"id": 2, "nome": "Joe", "email": "joe@barbearia.com", "role": "barbeiro", "ativo": true}]"#,
        )]);

        let barbers = list_barbers(&transport, &session()).expect("barbers");

        assert_eq!(barbers[0].role, "barbeiro");
        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:8000/api/users/barbeiros/list"
        );
    }
}
