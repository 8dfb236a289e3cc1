use crate::shared::api::{DeleteMessages, EntityMessages};
use crate::shared::form::FormSchema;
use contracts::domain::a002_supplier::aggregate::{
    fields, is_duplicate_name, normalize_phone, Supplier, SupplierDto, DUPLICATE_NAME_MESSAGE,
    SUPPLIER_RULES,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::validation::{
    field_error, field_value, is_checked, Draft, FieldErrors, FieldSpec,
};

pub const SUPPLIER_MESSAGES: EntityMessages = EntityMessages {
    created: "Proveedor creado correctamente.",
    updated: "Proveedor actualizado correctamente.",
    conflict: DUPLICATE_NAME_MESSAGE,
    save_failed: "Error al guardar proveedor",
};

pub const SUPPLIER_DELETE_MESSAGES: DeleteMessages = DeleteMessages {
    confirm: "¿Estás seguro de eliminar este proveedor?",
    deleted: "Proveedor eliminado correctamente.",
    dependency: "No se puede eliminar el proveedor porque tiene mantenciones activas.",
    failed: "Error al eliminar proveedor.",
};

pub const EDIT_CONFIRMATION: &str = "¿Deseas guardar los cambios del proveedor?";

pub struct SupplierForm;

impl FormSchema for SupplierForm {
    type Record = Supplier;
    type Payload = SupplierDto;

    fn rules() -> &'static [FieldSpec] {
        SUPPLIER_RULES
    }

    fn messages() -> &'static EntityMessages {
        &SUPPLIER_MESSAGES
    }

    fn draft_from(record: &Supplier) -> Draft {
        record.to_draft()
    }

    fn normalize(field: &str, raw: &str) -> (String, Option<String>) {
        if field == fields::PHONE {
            (normalize_phone(raw), None)
        } else {
            (raw.to_string(), None)
        }
    }

    fn cascade(field: &str, draft: &mut Draft) {
        match field {
            fields::NEW_REGION => {
                draft.remove(fields::NEW_COMMUNE);
            }
            fields::USE_NEW_ADDRESS if !is_checked(draft, fields::USE_NEW_ADDRESS) => {
                for inline in [fields::NEW_STREET, fields::NEW_REGION, fields::NEW_COMMUNE] {
                    draft.remove(inline);
                }
            }
            _ => {}
        }
    }

    fn business_check(draft: &Draft, original: Option<&Supplier>, existing: &[Supplier]) -> FieldErrors {
        let editing = original.and_then(|s| s.id());
        if is_duplicate_name(field_value(draft, fields::NAME), existing, editing) {
            return field_error(fields::NAME, DUPLICATE_NAME_MESSAGE);
        }
        FieldErrors::new()
    }

    fn confirmation(_draft: &Draft, original: Option<&Supplier>) -> Option<String> {
        original.map(|_| EDIT_CONFIRMATION.to_string())
    }

    fn payload(draft: &Draft) -> Result<SupplierDto, String> {
        SupplierDto::from_draft(draft)
    }
}
