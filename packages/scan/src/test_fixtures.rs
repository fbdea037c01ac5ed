//! DICOM files for tests.

use std::path::Path;

use dicom::core::{DataElement, PrimitiveValue, Tag, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};

const SOP_INSTANCE_UID: &str = "1.2.826.0.1.3680043.2.1125.1";

/// Header values to write; `None` leaves the element out.
pub struct StudyFields {
    pub patient_name: Option<&'static str>,
    pub birth_date: Option<&'static str>,
    pub study_date: Option<&'static str>,
    pub modality: Option<&'static str>,
}

impl StudyFields {
    pub const fn mueller() -> Self {
        Self {
            patient_name: Some("Mueller^Hans"),
            birth_date: Some("19800101"),
            study_date: Some("20230101"),
            modality: Some("CT"),
        }
    }
}

/// Write a minimal CT image header (no pixel data) to `path`.
pub fn write_dicom(path: &Path, fields: &StudyFields) {
    let mut obj = InMemDicomObject::from_element_iter([
        DataElement::new(
            tags::SOP_CLASS_UID,
            VR::UI,
            PrimitiveValue::from(uids::CT_IMAGE_STORAGE),
        ),
        DataElement::new(
            tags::SOP_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(SOP_INSTANCE_UID),
        ),
    ]);

    let optional: [(Tag, VR, Option<&str>); 4] = [
        (tags::PATIENT_NAME, VR::PN, fields.patient_name),
        (tags::PATIENT_BIRTH_DATE, VR::DA, fields.birth_date),
        (tags::STUDY_DATE, VR::DA, fields.study_date),
        (tags::MODALITY, VR::CS, fields.modality),
    ];
    for (tag, vr, value) in optional {
        if let Some(value) = value {
            obj.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
        }
    }

    obj.with_meta(
        FileMetaTableBuilder::new()
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid(SOP_INSTANCE_UID),
    )
    .unwrap()
    .write_to_file(path)
    .unwrap();
}
