//! [`Handler`] abstractions.

use std::{future::Future, sync::Arc};

/// Executable handler of `Args`.
///
/// Every query, command and infrastructure operation is expressed as an
/// implementation of this trait for its own argument type.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

impl<Args, H> Handler<Args> for Arc<H>
where
    H: Handler<Args>,
{
    type Ok = H::Ok;
    type Err = H::Err;

    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>> {
        (**self).execute(args)
    }
}
