//! Static ISO-3166 country table.
//!
//! Row order determines the interned id of each country (index + 1; id 0 is
//! reserved for "unknown"). The table follows the ISO 3166-1 assignments,
//! including the user-assigned `XK` entry the upstream country dataset
//! carries for Kosovo.

use super::CountryMeta;

const fn c(
    alpha2: &'static str,
    alpha3: &'static str,
    common_name: &'static str,
    official_name: &'static str,
) -> CountryMeta {
    CountryMeta {
        alpha2,
        alpha3,
        common_name,
        official_name,
    }
}

pub(super) const COUNTRIES: &[CountryMeta] = &[
    c("AD", "AND", "Andorra", "Principality of Andorra"),
    c("AE", "ARE", "United Arab Emirates", "United Arab Emirates"),
    c("AF", "AFG", "Afghanistan", "Islamic Republic of Afghanistan"),
    c("AG", "ATG", "Antigua and Barbuda", "Antigua and Barbuda"),
    c("AI", "AIA", "Anguilla", "Anguilla"),
    c("AL", "ALB", "Albania", "Republic of Albania"),
    c("AM", "ARM", "Armenia", "Republic of Armenia"),
    c("AO", "AGO", "Angola", "Republic of Angola"),
    c("AQ", "ATA", "Antarctica", "Antarctica"),
    c("AR", "ARG", "Argentina", "Argentine Republic"),
    c("AS", "ASM", "American Samoa", "American Samoa"),
    c("AT", "AUT", "Austria", "Republic of Austria"),
    c("AU", "AUS", "Australia", "Commonwealth of Australia"),
    c("AW", "ABW", "Aruba", "Aruba"),
    c("AX", "ALA", "Åland Islands", "Åland Islands"),
    c("AZ", "AZE", "Azerbaijan", "Republic of Azerbaijan"),
    c("BA", "BIH", "Bosnia and Herzegovina", "Bosnia and Herzegovina"),
    c("BB", "BRB", "Barbados", "Barbados"),
    c("BD", "BGD", "Bangladesh", "People's Republic of Bangladesh"),
    c("BE", "BEL", "Belgium", "Kingdom of Belgium"),
    c("BF", "BFA", "Burkina Faso", "Burkina Faso"),
    c("BG", "BGR", "Bulgaria", "Republic of Bulgaria"),
    c("BH", "BHR", "Bahrain", "Kingdom of Bahrain"),
    c("BI", "BDI", "Burundi", "Republic of Burundi"),
    c("BJ", "BEN", "Benin", "Republic of Benin"),
    c("BL", "BLM", "Saint Barthélemy", "Collectivity of Saint Barthélemy"),
    c("BM", "BMU", "Bermuda", "Bermuda"),
    c("BN", "BRN", "Brunei", "Nation of Brunei, Abode of Peace"),
    c("BO", "BOL", "Bolivia", "Plurinational State of Bolivia"),
    c("BQ", "BES", "Caribbean Netherlands", "Bonaire, Sint Eustatius and Saba"),
    c("BR", "BRA", "Brazil", "Federative Republic of Brazil"),
    c("BS", "BHS", "Bahamas", "Commonwealth of the Bahamas"),
    c("BT", "BTN", "Bhutan", "Kingdom of Bhutan"),
    c("BV", "BVT", "Bouvet Island", "Bouvet Island"),
    c("BW", "BWA", "Botswana", "Republic of Botswana"),
    c("BY", "BLR", "Belarus", "Republic of Belarus"),
    c("BZ", "BLZ", "Belize", "Belize"),
    c("CA", "CAN", "Canada", "Canada"),
    c("CC", "CCK", "Cocos (Keeling) Islands", "Territory of the Cocos (Keeling) Islands"),
    c("CD", "COD", "DR Congo", "Democratic Republic of the Congo"),
    c("CF", "CAF", "Central African Republic", "Central African Republic"),
    c("CG", "COG", "Republic of the Congo", "Republic of the Congo"),
    c("CH", "CHE", "Switzerland", "Swiss Confederation"),
    c("CI", "CIV", "Ivory Coast", "Republic of Côte d'Ivoire"),
    c("CK", "COK", "Cook Islands", "Cook Islands"),
    c("CL", "CHL", "Chile", "Republic of Chile"),
    c("CM", "CMR", "Cameroon", "Republic of Cameroon"),
    c("CN", "CHN", "China", "People's Republic of China"),
    c("CO", "COL", "Colombia", "Republic of Colombia"),
    c("CR", "CRI", "Costa Rica", "Republic of Costa Rica"),
    c("CU", "CUB", "Cuba", "Republic of Cuba"),
    c("CV", "CPV", "Cape Verde", "Republic of Cabo Verde"),
    c("CW", "CUW", "Curaçao", "Country of Curaçao"),
    c("CX", "CXR", "Christmas Island", "Territory of Christmas Island"),
    c("CY", "CYP", "Cyprus", "Republic of Cyprus"),
    c("CZ", "CZE", "Czechia", "Czech Republic"),
    c("DE", "DEU", "Germany", "Federal Republic of Germany"),
    c("DJ", "DJI", "Djibouti", "Republic of Djibouti"),
    c("DK", "DNK", "Denmark", "Kingdom of Denmark"),
    c("DM", "DMA", "Dominica", "Commonwealth of Dominica"),
    c("DO", "DOM", "Dominican Republic", "Dominican Republic"),
    c("DZ", "DZA", "Algeria", "People's Democratic Republic of Algeria"),
    c("EC", "ECU", "Ecuador", "Republic of Ecuador"),
    c("EE", "EST", "Estonia", "Republic of Estonia"),
    c("EG", "EGY", "Egypt", "Arab Republic of Egypt"),
    c("EH", "ESH", "Western Sahara", "Sahrawi Arab Democratic Republic"),
    c("ER", "ERI", "Eritrea", "State of Eritrea"),
    c("ES", "ESP", "Spain", "Kingdom of Spain"),
    c("ET", "ETH", "Ethiopia", "Federal Democratic Republic of Ethiopia"),
    c("FI", "FIN", "Finland", "Republic of Finland"),
    c("FJ", "FJI", "Fiji", "Republic of Fiji"),
    c("FK", "FLK", "Falkland Islands", "Falkland Islands"),
    c("FM", "FSM", "Micronesia", "Federated States of Micronesia"),
    c("FO", "FRO", "Faroe Islands", "Faroe Islands"),
    c("FR", "FRA", "France", "French Republic"),
    c("GA", "GAB", "Gabon", "Gabonese Republic"),
    c("GB", "GBR", "United Kingdom", "United Kingdom of Great Britain and Northern Ireland"),
    c("GD", "GRD", "Grenada", "Grenada"),
    c("GE", "GEO", "Georgia", "Georgia"),
    c("GF", "GUF", "French Guiana", "Guiana"),
    c("GG", "GGY", "Guernsey", "Bailiwick of Guernsey"),
    c("GH", "GHA", "Ghana", "Republic of Ghana"),
    c("GI", "GIB", "Gibraltar", "Gibraltar"),
    c("GL", "GRL", "Greenland", "Greenland"),
    c("GM", "GMB", "Gambia", "Republic of the Gambia"),
    c("GN", "GIN", "Guinea", "Republic of Guinea"),
    c("GP", "GLP", "Guadeloupe", "Guadeloupe"),
    c("GQ", "GNQ", "Equatorial Guinea", "Republic of Equatorial Guinea"),
    c("GR", "GRC", "Greece", "Hellenic Republic"),
    c("GS", "SGS", "South Georgia", "South Georgia and the South Sandwich Islands"),
    c("GT", "GTM", "Guatemala", "Republic of Guatemala"),
    c("GU", "GUM", "Guam", "Guam"),
    c("GW", "GNB", "Guinea-Bissau", "Republic of Guinea-Bissau"),
    c("GY", "GUY", "Guyana", "Co-operative Republic of Guyana"),
    c("HK", "HKG", "Hong Kong", "Hong Kong Special Administrative Region of the People's Republic of China"),
    c("HM", "HMD", "Heard Island and McDonald Islands", "Heard Island and McDonald Islands"),
    c("HN", "HND", "Honduras", "Republic of Honduras"),
    c("HR", "HRV", "Croatia", "Republic of Croatia"),
    c("HT", "HTI", "Haiti", "Republic of Haiti"),
    c("HU", "HUN", "Hungary", "Hungary"),
    c("ID", "IDN", "Indonesia", "Republic of Indonesia"),
    c("IE", "IRL", "Ireland", "Republic of Ireland"),
    c("IL", "ISR", "Israel", "State of Israel"),
    c("IM", "IMN", "Isle of Man", "Isle of Man"),
    c("IN", "IND", "India", "Republic of India"),
    c("IO", "IOT", "British Indian Ocean Territory", "British Indian Ocean Territory"),
    c("IQ", "IRQ", "Iraq", "Republic of Iraq"),
    c("IR", "IRN", "Iran", "Islamic Republic of Iran"),
    c("IS", "ISL", "Iceland", "Iceland"),
    c("IT", "ITA", "Italy", "Italian Republic"),
    c("JE", "JEY", "Jersey", "Bailiwick of Jersey"),
    c("JM", "JAM", "Jamaica", "Jamaica"),
    c("JO", "JOR", "Jordan", "Hashemite Kingdom of Jordan"),
    c("JP", "JPN", "Japan", "Japan"),
    c("KE", "KEN", "Kenya", "Republic of Kenya"),
    c("KG", "KGZ", "Kyrgyzstan", "Kyrgyz Republic"),
    c("KH", "KHM", "Cambodia", "Kingdom of Cambodia"),
    c("KI", "KIR", "Kiribati", "Republic of Kiribati"),
    c("KM", "COM", "Comoros", "Union of the Comoros"),
    c("KN", "KNA", "Saint Kitts and Nevis", "Federation of Saint Christopher and Nevis"),
    c("KP", "PRK", "North Korea", "Democratic People's Republic of Korea"),
    c("KR", "KOR", "South Korea", "Republic of Korea"),
    c("KW", "KWT", "Kuwait", "State of Kuwait"),
    c("KY", "CYM", "Cayman Islands", "Cayman Islands"),
    c("KZ", "KAZ", "Kazakhstan", "Republic of Kazakhstan"),
    c("LA", "LAO", "Laos", "Lao People's Democratic Republic"),
    c("LB", "LBN", "Lebanon", "Lebanese Republic"),
    c("LC", "LCA", "Saint Lucia", "Saint Lucia"),
    c("LI", "LIE", "Liechtenstein", "Principality of Liechtenstein"),
    c("LK", "LKA", "Sri Lanka", "Democratic Socialist Republic of Sri Lanka"),
    c("LR", "LBR", "Liberia", "Republic of Liberia"),
    c("LS", "LSO", "Lesotho", "Kingdom of Lesotho"),
    c("LT", "LTU", "Lithuania", "Republic of Lithuania"),
    c("LU", "LUX", "Luxembourg", "Grand Duchy of Luxembourg"),
    c("LV", "LVA", "Latvia", "Republic of Latvia"),
    c("LY", "LBY", "Libya", "State of Libya"),
    c("MA", "MAR", "Morocco", "Kingdom of Morocco"),
    c("MC", "MCO", "Monaco", "Principality of Monaco"),
    c("MD", "MDA", "Moldova", "Republic of Moldova"),
    c("ME", "MNE", "Montenegro", "Montenegro"),
    c("MF", "MAF", "Saint Martin", "Saint Martin"),
    c("MG", "MDG", "Madagascar", "Republic of Madagascar"),
    c("MH", "MHL", "Marshall Islands", "Republic of the Marshall Islands"),
    c("MK", "MKD", "North Macedonia", "Republic of North Macedonia"),
    c("ML", "MLI", "Mali", "Republic of Mali"),
    c("MM", "MMR", "Myanmar", "Republic of the Union of Myanmar"),
    c("MN", "MNG", "Mongolia", "Mongolia"),
    c("MO", "MAC", "Macau", "Macao Special Administrative Region of the People's Republic of China"),
    c("MP", "MNP", "Northern Mariana Islands", "Commonwealth of the Northern Mariana Islands"),
    c("MQ", "MTQ", "Martinique", "Martinique"),
    c("MR", "MRT", "Mauritania", "Islamic Republic of Mauritania"),
    c("MS", "MSR", "Montserrat", "Montserrat"),
    c("MT", "MLT", "Malta", "Republic of Malta"),
    c("MU", "MUS", "Mauritius", "Republic of Mauritius"),
    c("MV", "MDV", "Maldives", "Republic of the Maldives"),
    c("MW", "MWI", "Malawi", "Republic of Malawi"),
    c("MX", "MEX", "Mexico", "United Mexican States"),
    c("MY", "MYS", "Malaysia", "Malaysia"),
    c("MZ", "MOZ", "Mozambique", "Republic of Mozambique"),
    c("NA", "NAM", "Namibia", "Republic of Namibia"),
    c("NC", "NCL", "New Caledonia", "New Caledonia"),
    c("NE", "NER", "Niger", "Republic of Niger"),
    c("NF", "NFK", "Norfolk Island", "Territory of Norfolk Island"),
    c("NG", "NGA", "Nigeria", "Federal Republic of Nigeria"),
    c("NI", "NIC", "Nicaragua", "Republic of Nicaragua"),
    c("NL", "NLD", "Netherlands", "Kingdom of the Netherlands"),
    c("NO", "NOR", "Norway", "Kingdom of Norway"),
    c("NP", "NPL", "Nepal", "Federal Democratic Republic of Nepal"),
    c("NR", "NRU", "Nauru", "Republic of Nauru"),
    c("NU", "NIU", "Niue", "Niue"),
    c("NZ", "NZL", "New Zealand", "New Zealand"),
    c("OM", "OMN", "Oman", "Sultanate of Oman"),
    c("PA", "PAN", "Panama", "Republic of Panama"),
    c("PE", "PER", "Peru", "Republic of Peru"),
    c("PF", "PYF", "French Polynesia", "French Polynesia"),
    c("PG", "PNG", "Papua New Guinea", "Independent State of Papua New Guinea"),
    c("PH", "PHL", "Philippines", "Republic of the Philippines"),
    c("PK", "PAK", "Pakistan", "Islamic Republic of Pakistan"),
    c("PL", "POL", "Poland", "Republic of Poland"),
    c("PM", "SPM", "Saint Pierre and Miquelon", "Saint Pierre and Miquelon"),
    c("PN", "PCN", "Pitcairn Islands", "Pitcairn Group of Islands"),
    c("PR", "PRI", "Puerto Rico", "Commonwealth of Puerto Rico"),
    c("PS", "PSE", "Palestine", "State of Palestine"),
    c("PT", "PRT", "Portugal", "Portuguese Republic"),
    c("PW", "PLW", "Palau", "Republic of Palau"),
    c("PY", "PRY", "Paraguay", "Republic of Paraguay"),
    c("QA", "QAT", "Qatar", "State of Qatar"),
    c("RE", "REU", "Réunion", "Réunion Island"),
    c("RO", "ROU", "Romania", "Romania"),
    c("RS", "SRB", "Serbia", "Republic of Serbia"),
    c("RU", "RUS", "Russia", "Russian Federation"),
    c("RW", "RWA", "Rwanda", "Republic of Rwanda"),
    c("SA", "SAU", "Saudi Arabia", "Kingdom of Saudi Arabia"),
    c("SB", "SLB", "Solomon Islands", "Solomon Islands"),
    c("SC", "SYC", "Seychelles", "Republic of Seychelles"),
    c("SD", "SDN", "Sudan", "Republic of the Sudan"),
    c("SE", "SWE", "Sweden", "Kingdom of Sweden"),
    c("SG", "SGP", "Singapore", "Republic of Singapore"),
    c("SH", "SHN", "Saint Helena, Ascension and Tristan da Cunha", "Saint Helena, Ascension and Tristan da Cunha"),
    c("SI", "SVN", "Slovenia", "Republic of Slovenia"),
    c("SJ", "SJM", "Svalbard and Jan Mayen", "Svalbard og Jan Mayen"),
    c("SK", "SVK", "Slovakia", "Slovak Republic"),
    c("SL", "SLE", "Sierra Leone", "Republic of Sierra Leone"),
    c("SM", "SMR", "San Marino", "Republic of San Marino"),
    c("SN", "SEN", "Senegal", "Republic of Senegal"),
    c("SO", "SOM", "Somalia", "Federal Republic of Somalia"),
    c("SR", "SUR", "Suriname", "Republic of Suriname"),
    c("SS", "SSD", "South Sudan", "Republic of South Sudan"),
    c("ST", "STP", "São Tomé and Príncipe", "Democratic Republic of São Tomé and Príncipe"),
    c("SV", "SLV", "El Salvador", "Republic of El Salvador"),
    c("SX", "SXM", "Sint Maarten", "Sint Maarten"),
    c("SY", "SYR", "Syria", "Syrian Arab Republic"),
    c("SZ", "SWZ", "Eswatini", "Kingdom of Eswatini"),
    c("TC", "TCA", "Turks and Caicos Islands", "Turks and Caicos Islands"),
    c("TD", "TCD", "Chad", "Republic of Chad"),
    c("TF", "ATF", "French Southern and Antarctic Lands", "Territory of the French Southern and Antarctic Lands"),
    c("TG", "TGO", "Togo", "Togolese Republic"),
    c("TH", "THA", "Thailand", "Kingdom of Thailand"),
    c("TJ", "TJK", "Tajikistan", "Republic of Tajikistan"),
    c("TK", "TKL", "Tokelau", "Tokelau"),
    c("TL", "TLS", "Timor-Leste", "Democratic Republic of Timor-Leste"),
    c("TM", "TKM", "Turkmenistan", "Turkmenistan"),
    c("TN", "TUN", "Tunisia", "Tunisian Republic"),
    c("TO", "TON", "Tonga", "Kingdom of Tonga"),
    c("TR", "TUR", "Turkey", "Republic of Türkiye"),
    c("TT", "TTO", "Trinidad and Tobago", "Republic of Trinidad and Tobago"),
    c("TV", "TUV", "Tuvalu", "Tuvalu"),
    c("TW", "TWN", "Taiwan", "Republic of China (Taiwan)"),
    c("TZ", "TZA", "Tanzania", "United Republic of Tanzania"),
    c("UA", "UKR", "Ukraine", "Ukraine"),
    c("UG", "UGA", "Uganda", "Republic of Uganda"),
    c("UM", "UMI", "United States Minor Outlying Islands", "United States Minor Outlying Islands"),
    c("US", "USA", "United States", "United States of America"),
    c("UY", "URY", "Uruguay", "Oriental Republic of Uruguay"),
    c("UZ", "UZB", "Uzbekistan", "Republic of Uzbekistan"),
    c("VA", "VAT", "Vatican City", "Vatican City State"),
    c("VC", "VCT", "Saint Vincent and the Grenadines", "Saint Vincent and the Grenadines"),
    c("VE", "VEN", "Venezuela", "Bolivarian Republic of Venezuela"),
    c("VG", "VGB", "British Virgin Islands", "Virgin Islands"),
    c("VI", "VIR", "United States Virgin Islands", "Virgin Islands of the United States"),
    c("VN", "VNM", "Vietnam", "Socialist Republic of Vietnam"),
    c("VU", "VUT", "Vanuatu", "Republic of Vanuatu"),
    c("WF", "WLF", "Wallis and Futuna", "Territory of the Wallis and Futuna Islands"),
    c("WS", "WSM", "Samoa", "Independent State of Samoa"),
    c("XK", "XKX", "Kosovo", "Republic of Kosovo"),
    c("YE", "YEM", "Yemen", "Republic of Yemen"),
    c("YT", "MYT", "Mayotte", "Department of Mayotte"),
    c("ZA", "ZAF", "South Africa", "Republic of South Africa"),
    c("ZM", "ZMB", "Zambia", "Republic of Zambia"),
    c("ZW", "ZWE", "Zimbabwe", "Republic of Zimbabwe"),
];
