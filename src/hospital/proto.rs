//! Protobuf messages and gRPC client for `hospital.HospitalService`
//!
//! Mirrors `proto/hospital.proto`. Keep the tags in sync with that file.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Patient {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub full_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub code: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Appointment {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub patient_id: ::prost::alloc::string::String,
    /// RFC 3339
    #[prost(string, tag = "3")]
    pub start_date_time: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub end_date_time: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub location: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub reason: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Lab {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub code: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub patient_id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub lab_type: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub notes: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub result: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub status: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub requested_on: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub completed_on: ::prost::alloc::string::String,
    #[prost(string, tag = "10")]
    pub canceled_on: ::prost::alloc::string::String,
    #[prost(string, tag = "11")]
    pub appointment_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchPatientsRequest {
    #[prost(string, tag = "1")]
    pub query: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchPatientsResponse {
    #[prost(message, repeated, tag = "1")]
    pub patients: ::prost::alloc::vec::Vec<Patient>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListPatientAppointmentsRequest {
    #[prost(string, tag = "1")]
    pub patient_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListPatientAppointmentsResponse {
    #[prost(message, repeated, tag = "1")]
    pub appointments: ::prost::alloc::vec::Vec<Appointment>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestLabRequest {
    #[prost(message, optional, tag = "1")]
    pub lab: ::core::option::Option<Lab>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestLabResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub lab: ::core::option::Option<Lab>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ListLabsRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListLabsResponse {
    #[prost(message, repeated, tag = "1")]
    pub labs: ::prost::alloc::vec::Vec<Lab>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLabRequest {
    #[prost(string, tag = "1")]
    pub lab_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLabResponse {
    #[prost(message, optional, tag = "1")]
    pub lab: ::core::option::Option<Lab>,
}

/// Client for the `hospital.HospitalService` gRPC service
pub mod hospital_service_client {
    use tonic::codegen::*;

    const SERVICE: &str = "hospital.HospitalService";

    #[derive(Debug, Clone)]
    pub struct HospitalServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl HospitalServiceClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> HospitalServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        async fn ready(&mut self) -> std::result::Result<(), tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })
        }

        pub async fn search_patients(
            &mut self,
            request: impl tonic::IntoRequest<super::SearchPatientsRequest>,
        ) -> std::result::Result<tonic::Response<super::SearchPatientsResponse>, tonic::Status>
        {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/hospital.HospitalService/SearchPatients",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new(SERVICE, "SearchPatients"));
            self.inner.unary(req, path, codec).await
        }

        pub async fn list_patient_appointments(
            &mut self,
            request: impl tonic::IntoRequest<super::ListPatientAppointmentsRequest>,
        ) -> std::result::Result<
            tonic::Response<super::ListPatientAppointmentsResponse>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/hospital.HospitalService/ListPatientAppointments",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new(SERVICE, "ListPatientAppointments"));
            self.inner.unary(req, path, codec).await
        }

        pub async fn request_lab(
            &mut self,
            request: impl tonic::IntoRequest<super::RequestLabRequest>,
        ) -> std::result::Result<tonic::Response<super::RequestLabResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/hospital.HospitalService/RequestLab");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new(SERVICE, "RequestLab"));
            self.inner.unary(req, path, codec).await
        }

        pub async fn list_labs(
            &mut self,
            request: impl tonic::IntoRequest<super::ListLabsRequest>,
        ) -> std::result::Result<tonic::Response<super::ListLabsResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/hospital.HospitalService/ListLabs");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new(SERVICE, "ListLabs"));
            self.inner.unary(req, path, codec).await
        }

        pub async fn get_lab(
            &mut self,
            request: impl tonic::IntoRequest<super::GetLabRequest>,
        ) -> std::result::Result<tonic::Response<super::GetLabResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/hospital.HospitalService/GetLab");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new(SERVICE, "GetLab"));
            self.inner.unary(req, path, codec).await
        }
    }
}
