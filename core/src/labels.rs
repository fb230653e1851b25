//! User-facing strings.
//!
//! French is the panel's native language; English is provided for hosts that
//! mount it elsewhere.

use std::str::FromStr;

use crate::session::DraftField;
use crate::types::VehicleStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" | "fr-fr" => Ok(Locale::Fr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub locale: Locale,
    pub title: &'static str,
    pub add_button: &'static str,
    pub cancel_button: &'static str,
    pub create_submit: &'static str,
    pub update_submit: &'static str,
    pub edit_action: &'static str,
    pub delete_action: &'static str,
    pub owner_placeholder: &'static str,
    pub no_owner: &'static str,
    pub empty_list: &'static str,
    pub actions_header: &'static str,
    pub plate_header: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub save_failed: &'static str,
    pub delete_failed: &'static str,
    pub confirm_delete: &'static str,
}

static FR: Labels = Labels {
    locale: Locale::Fr,
    title: "Gestion des véhicules",
    add_button: "Ajouter un véhicule",
    cancel_button: "Annuler",
    create_submit: "Ajouter",
    update_submit: "Modifier",
    edit_action: "Modifier",
    delete_action: "Supprimer",
    owner_placeholder: "-- Sélectionner un propriétaire --",
    no_owner: "-",
    empty_list: "Aucun véhicule enregistré",
    actions_header: "Actions",
    plate_header: "Plaque",
    created: "Véhicule ajouté avec succès",
    updated: "Véhicule modifié avec succès",
    deleted: "Véhicule supprimé avec succès",
    save_failed: "Erreur lors de l'opération",
    delete_failed: "Erreur lors de la suppression du véhicule",
    confirm_delete: "Êtes-vous sûr de vouloir supprimer ce véhicule ?",
};

static EN: Labels = Labels {
    locale: Locale::En,
    title: "Vehicle management",
    add_button: "Add a vehicle",
    cancel_button: "Cancel",
    create_submit: "Add",
    update_submit: "Save",
    edit_action: "Edit",
    delete_action: "Delete",
    owner_placeholder: "-- Select an owner --",
    no_owner: "-",
    empty_list: "No vehicles registered",
    actions_header: "Actions",
    plate_header: "Plate",
    created: "Vehicle added",
    updated: "Vehicle updated",
    deleted: "Vehicle deleted",
    save_failed: "The operation failed",
    delete_failed: "The vehicle could not be deleted",
    confirm_delete: "Are you sure you want to delete this vehicle?",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::Fr => &FR,
            Locale::En => &EN,
        }
    }

    pub fn status(&self, status: VehicleStatus) -> &'static str {
        match (self.locale, status) {
            (Locale::Fr, VehicleStatus::Available) => "Disponible",
            (Locale::Fr, VehicleStatus::Repair) => "En réparation",
            (Locale::Fr, VehicleStatus::Sold) => "Vendu",
            (Locale::En, VehicleStatus::Available) => "Available",
            (Locale::En, VehicleStatus::Repair) => "In repair",
            (Locale::En, VehicleStatus::Sold) => "Sold",
            (_, VehicleStatus::Unknown) => "",
        }
    }

    /// Label of a form field.
    pub fn field(&self, field: DraftField) -> &'static str {
        match (self.locale, field) {
            (Locale::Fr, DraftField::Brand) => "Marque",
            (Locale::Fr, DraftField::Model) => "Modèle",
            (Locale::Fr, DraftField::Year) => "Année",
            (Locale::Fr, DraftField::LicensePlate) => "Plaque d'immatriculation",
            (Locale::Fr, DraftField::OwnerId) => "Propriétaire",
            (Locale::Fr, DraftField::Status) => "Statut",
            (Locale::En, DraftField::Brand) => "Brand",
            (Locale::En, DraftField::Model) => "Model",
            (Locale::En, DraftField::Year) => "Year",
            (Locale::En, DraftField::LicensePlate) => "License plate",
            (Locale::En, DraftField::OwnerId) => "Owner",
            (Locale::En, DraftField::Status) => "Status",
        }
    }
}
