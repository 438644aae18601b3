//! Multi-workbook / multi-sheet fan-in: turns a scheme's semicolon-separated
//! `excel`/`sheet` option lists into a flat list of `(workbook, sheet)` pairs
//! to parse and concatenate into one record list.

use sheetyield_descriptor::MessageOptions;

use crate::error::SchemeError;

pub fn workbook_sheet_pairs(
    message_name: &str,
    options: &MessageOptions,
) -> Result<Vec<(String, String)>, SchemeError> {
    let excel = options.excel_paths();
    let sheet = options.sheet_names();
    if excel.is_empty() || sheet.is_empty() {
        return Err(SchemeError::MissingWorkbookOptions {
            message: message_name.to_string(),
        });
    }

    let pairs = match (excel.len(), sheet.len()) {
        (e, s) if e == s => excel.into_iter().zip(sheet).collect(),
        (1, s) => {
            let workbook = excel.into_iter().next().expect("len == 1");
            sheet.into_iter().map(|sheet| (workbook.clone(), sheet)).collect()
        }
        (e, 1) => {
            let sheet = sheet.into_iter().next().expect("len == 1");
            excel.into_iter().map(|workbook| (workbook, sheet.clone())).collect()
        }
        (excel_len, sheet_len) => {
            return Err(SchemeError::MismatchedWorkbookSheetLists {
                message: message_name.to_string(),
                excel_len,
                sheet_len,
            })
        }
    };
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(excel: &str, sheet: &str) -> MessageOptions {
        MessageOptions {
            excel: Some(excel.to_string()),
            sheet: Some(sheet.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn equal_length_lists_pair_up_positionally() {
        let pairs = workbook_sheet_pairs("Role", &options("a.xlsx;b.xlsx", "Sheet1;Sheet2")).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a.xlsx".to_string(), "Sheet1".to_string()),
                ("b.xlsx".to_string(), "Sheet2".to_string()),
            ]
        );
    }

    #[test]
    fn a_single_workbook_broadcasts_over_many_sheets() {
        let pairs = workbook_sheet_pairs("Role", &options("a.xlsx", "Sheet1;Sheet2")).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a.xlsx".to_string(), "Sheet1".to_string()),
                ("a.xlsx".to_string(), "Sheet2".to_string()),
            ]
        );
    }

    #[test]
    fn a_single_sheet_broadcasts_over_many_workbooks() {
        let pairs = workbook_sheet_pairs("Role", &options("a.xlsx;b.xlsx", "Sheet1")).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a.xlsx".to_string(), "Sheet1".to_string()),
                ("b.xlsx".to_string(), "Sheet1".to_string()),
            ]
        );
    }

    #[test]
    fn mismatched_unbroadcastable_lengths_are_rejected() {
        let err = workbook_sheet_pairs("Role", &options("a.xlsx;b.xlsx", "Sheet1;Sheet2;Sheet3"))
            .unwrap_err();
        assert!(matches!(err, SchemeError::MismatchedWorkbookSheetLists { .. }));
    }

    #[test]
    fn missing_options_are_rejected() {
        let err = workbook_sheet_pairs("Role", &MessageOptions::default()).unwrap_err();
        assert!(matches!(err, SchemeError::MissingWorkbookOptions { .. }));
    }
}
