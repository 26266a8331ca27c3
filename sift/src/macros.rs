//! Declarative generators for endpoint builders and namespace methods.
//!
//! `endpoint!` turns one operation description into a builder struct, its
//! option constructors and its [`Endpoint`](crate::Endpoint) impl.
//! `operations!` turns a list of `method => Builder(required...)` lines into
//! async call methods on a namespace.

macro_rules! endpoint {
    (@content_type) => {
        "application/json"
    };
    (@content_type $content_type:literal) => {
        $content_type
    };
    (@body_option Forbidden) => {};
    (@body_option $rule:ident) => {
        /// Sets the request body.
        pub fn with_body(body: impl Into<$crate::Body>) -> $crate::RequestOption<Self> {
            let body = body.into();
            $crate::RequestOption::new(move |request: &mut Self| request.body = Some(body.clone()))
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident {
            id: $id:literal,
            method: $method:ident,
            paths: [$($path:literal),+ $(,)?],
            required: [$($req:ident),* $(,)?],
            path_params: {$($pp:ident: $pp_ty:ty => $pp_fn:ident),* $(,)?},
            query: {$($q:ident: $q_ty:ty => $q_fn:ident),* $(,)?},
            body: $rule:ident
            $(, content_type: $content_type:literal)?
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            $(
                #[doc = concat!("Required `", stringify!($req), "` path parameter.")]
                pub $req: String,
            )*
            $(
                #[doc = concat!("Optional `", stringify!($pp), "` path parameter.")]
                pub $pp: Option<$pp_ty>,
            )*
            $(
                #[doc = concat!("`", stringify!($q), "` query parameter.")]
                pub $q: Option<$q_ty>,
            )*
            /// Request body.
            pub body: Option<$crate::Body>,
            /// Parameters shared by every endpoint.
            pub common: $crate::CommonParams,
        }

        impl $name {
            /// Creates the builder from its required parameters.
            pub fn new($($req: impl Into<String>),*) -> Self {
                Self {
                    $($req: $req.into(),)*
                    ..Default::default()
                }
            }

            $(
                #[doc = concat!("Sets the optional `", stringify!($pp), "` path parameter.")]
                pub fn $pp_fn(value: impl Into<$pp_ty>) -> $crate::RequestOption<Self> {
                    let value: $pp_ty = value.into();
                    $crate::RequestOption::new(move |request: &mut Self| {
                        request.$pp = Some(value.clone())
                    })
                }
            )*

            $(
                #[doc = concat!("Sets the `", stringify!($q), "` query parameter.")]
                pub fn $q_fn(value: impl Into<$q_ty>) -> $crate::RequestOption<Self> {
                    let value: $q_ty = value.into();
                    $crate::RequestOption::new(move |request: &mut Self| {
                        request.$q = Some(value.clone())
                    })
                }
            )*

            endpoint!(@body_option $rule);

            /// Sets a per-call header.
            pub fn with_header(
                name: impl Into<String>,
                value: impl Into<String>,
            ) -> $crate::RequestOption<Self> {
                $crate::RequestOption::header(name, value)
            }

            /// Pretty-prints the response.
            pub fn with_pretty() -> $crate::RequestOption<Self> {
                $crate::RequestOption::pretty()
            }

            /// Returns human-readable units.
            pub fn with_human() -> $crate::RequestOption<Self> {
                $crate::RequestOption::human()
            }

            /// Includes stack traces in error responses.
            pub fn with_error_trace() -> $crate::RequestOption<Self> {
                $crate::RequestOption::error_trace()
            }

            /// Filters the response down to the given paths.
            pub fn with_filter_path(paths: impl Into<$crate::List>) -> $crate::RequestOption<Self> {
                $crate::RequestOption::filter_path(paths)
            }

            /// Sets the `X-Opaque-Id` header.
            pub fn with_opaque_id(id: impl Into<String>) -> $crate::RequestOption<Self> {
                $crate::RequestOption::opaque_id(id)
            }

            /// Bounds the exchange to `timeout`.
            pub fn with_request_timeout(timeout: std::time::Duration) -> $crate::RequestOption<Self> {
                $crate::RequestOption::request_timeout(timeout)
            }

            /// Bounds the exchange to an absolute deadline.
            pub fn with_deadline(deadline: std::time::Instant) -> $crate::RequestOption<Self> {
                $crate::RequestOption::deadline(deadline)
            }

            /// Cancels the exchange when `token` fires.
            pub fn with_cancellation(
                token: $crate::CancellationToken,
            ) -> $crate::RequestOption<Self> {
                $crate::RequestOption::cancellation(token)
            }
        }

        impl $crate::Endpoint for $name {
            const ID: &'static str = $id;
            const METHOD: $crate::RestMethod = $crate::RestMethod::$method;
            const PATHS: &'static [&'static str] = &[$($path),+];
            const BODY: $crate::BodyRule = $crate::BodyRule::$rule;
            const CONTENT_TYPE: &'static str = endpoint!(@content_type $($content_type)?);

            fn common(&self) -> &$crate::CommonParams {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::CommonParams {
                &mut self.common
            }

            fn required_params(&self) -> Vec<(&'static str, &str)> {
                vec![$((stringify!($req), self.$req.as_str())),*]
            }

            #[allow(unused_mut)]
            fn path_params(&self) -> Vec<(&'static str, String)> {
                let mut params: Vec<(&'static str, String)> =
                    vec![$((stringify!($req), self.$req.clone())),*];
                $(
                    if let Some(value) = &self.$pp {
                        params.push((stringify!($pp), $crate::ParamValue::to_param(value)));
                    }
                )*
                params
            }

            #[allow(unused_variables)]
            fn write_query(&self, query: &mut $crate::QueryParams) {
                $(
                    if let Some(value) = &self.$q {
                        query.set(stringify!($q), $crate::ParamValue::to_param(value));
                    }
                )*
            }

            fn body(&self) -> Option<&$crate::Body> {
                self.body.as_ref()
            }

            fn take_body(&mut self) -> Option<$crate::Body> {
                self.body.take()
            }
        }
    };
}

macro_rules! operations {
    ($($(#[$meta:meta])* $method:ident => $endpoint:ident($($req:ident),*);)*) => {
        $(
            $(#[$meta])*
            pub async fn $method(
                &self,
                $($req: impl Into<String>,)*
                options: impl IntoIterator<Item = $crate::RequestOption<$endpoint>>,
            ) -> Result<$crate::Response, $crate::SiftError> {
                self.client()
                    .perform($endpoint::new($($req),*), options)
                    .await
            }
        )*
    };
}
