//! [`ActorEntity`] implementation for [`Document`].
//!
//! Both hooks run the same pipeline inside the actor: resolve the type, validate
//! the payload against it, and only then touch the stored document. A type change
//! answers [`Revision::Replaced`], so the actor deletes and recreates the document
//! under the same id as one step.

use super::{CollectionContext, Document, DocumentError, DocumentId, DocumentWrite};
use crate::resolver::{Resolution, TypeResolver, WriteTarget};
use crate::validator::{Fields, Validator};
use async_trait::async_trait;
use resource_actor::{ActorEntity, Revision};
use tracing::{debug, info};

fn prepare<'a>(
    ctx: &'a CollectionContext,
    write: &DocumentWrite,
    existing: Option<&str>,
) -> Result<(Resolution<'a>, Fields), DocumentError> {
    let resolution = TypeResolver::new(&ctx.registry).resolve(
        &ctx.endpoint,
        write.declared_type.as_deref(),
        &write.payload,
        existing,
    )?;
    let fields = Validator::new(&ctx.registry).validate(resolution.schema, &write.payload)?;
    Ok((resolution, fields))
}

#[async_trait]
impl ActorEntity for Document {
    type Id = DocumentId;
    type Create = DocumentWrite;
    type Update = DocumentWrite;
    type Context = CollectionContext;
    type Error = DocumentError;

    fn from_create_params(
        id: DocumentId,
        params: DocumentWrite,
        ctx: &CollectionContext,
    ) -> Result<Self, Self::Error> {
        let (resolution, fields) = prepare(ctx, &params, None)?;
        debug!(endpoint = %ctx.endpoint.name, %id, resource_type = resolution.resource_type(), "Validated");
        Ok(Self {
            id,
            resource_type: resolution.resource_type().to_string(),
            fields,
        })
    }

    async fn on_update(
        &mut self,
        update: DocumentWrite,
        ctx: &CollectionContext,
    ) -> Result<Revision<Self>, Self::Error> {
        let (resolution, fields) = prepare(ctx, &update, Some(&self.resource_type))?;

        match &resolution.target {
            WriteTarget::ExistingTypeChanged { previous } => {
                info!(
                    endpoint = %ctx.endpoint.name,
                    id = %self.id,
                    from = %previous,
                    to = resolution.resource_type(),
                    "Type changed"
                );
                Ok(Revision::Replaced(Self {
                    id: self.id,
                    resource_type: resolution.resource_type().to_string(),
                    fields,
                }))
            }
            WriteTarget::ExistingSameType | WriteTarget::NoResource => {
                self.fields = fields;
                Ok(Revision::Modified)
            }
        }
    }
}
